//! Swipe-to-act on list rows.
//!
//! Dragging a row right past the threshold requests an edit of that row;
//! dragging it left requests deletion.  The controller never touches the list
//! itself: it only emits [`SwipeIntent`]s for the list owner to apply.
//!
//! Only one row can be dragged at a time, so a single tracker is bound to
//! whichever row received the pointer-down.  A row that is currently being
//! text-edited ignores swipes entirely.

use super::tracker::{GesturePhase, GestureTracker, Outcome, SwipeDirection, TrackerConfig};
use super::{GestureSample, PointerEvent, SnapTransition};
use crate::config::GestureConfig;

/// Default action threshold: 25 % of the row width.
pub const DEFAULT_COMMIT_FRACTION: f32 = 0.25;

/// Gap kept between the swipe indicator and the dragged row edge.
const INDICATOR_INSET: f32 = 12.0;

// ---------------------------------------------------------------------------
// SwipeIntent / SwipeIndicator
// ---------------------------------------------------------------------------

/// Action requested by a committed row swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeIntent {
    /// Row dragged right: start editing it.
    Edit(usize),
    /// Row dragged left: delete it.
    Delete(usize),
}

impl SwipeIntent {
    /// Index of the row the intent applies to.
    pub fn row(&self) -> usize {
        match self {
            SwipeIntent::Edit(row) | SwipeIntent::Delete(row) => *row,
        }
    }
}

/// Action hint revealed behind a row while it is dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeIndicator {
    Edit { width: f32 },
    Delete { width: f32 },
}

// ---------------------------------------------------------------------------
// SwipeActionController
// ---------------------------------------------------------------------------

/// Turns row drags into edit/delete intents.
///
/// # Example
///
/// ```rust
/// use word_drill::gesture::{GestureSample, PointerEvent, SwipeActionController, SwipeIntent};
///
/// let mut rows = SwipeActionController::new();
/// rows.handle_pointer(4, PointerEvent::Down {
///     sample: GestureSample::new(100.0, 10.0, 0),
///     element_width: 300.0,
/// });
/// rows.handle_pointer(4, PointerEvent::Move(GestureSample::new(20.0, 10.0, 16)));
/// let intent = rows.handle_pointer(4, PointerEvent::Up(GestureSample::new(20.0, 10.0, 32)));
/// assert_eq!(intent, Some(SwipeIntent::Delete(4)));
/// ```
#[derive(Debug, Clone)]
pub struct SwipeActionController {
    tracker: GestureTracker,
    commit_fraction: f32,
    active_row: Option<usize>,
    row_width: f32,
    editing_row: Option<usize>,
}

impl Default for SwipeActionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeActionController {
    /// Controller with default thresholds.
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default(), DEFAULT_COMMIT_FRACTION)
    }

    pub fn with_config(tracker: TrackerConfig, commit_fraction: f32) -> Self {
        Self {
            tracker: GestureTracker::new(tracker),
            commit_fraction,
            active_row: None,
            row_width: 0.0,
            editing_row: None,
        }
    }

    /// Controller from the persisted gesture settings.
    pub fn from_config(config: &GestureConfig) -> Self {
        Self::with_config(TrackerConfig::from(config), config.swipe_commit_fraction)
    }

    // -----------------------------------------------------------------------
    // Editing suppression
    // -----------------------------------------------------------------------

    /// Mark `row` as being text-edited (or `None` when editing ends).
    ///
    /// A drag already in progress on that row is discarded.
    pub fn set_editing(&mut self, row: Option<usize>) {
        self.editing_row = row;
        if row.is_some() && row == self.active_row {
            self.reset();
        }
    }

    pub fn editing_row(&self) -> Option<usize> {
        self.editing_row
    }

    // -----------------------------------------------------------------------
    // Pointer delegation
    // -----------------------------------------------------------------------

    /// Feed a pointer event that targets `row`.
    ///
    /// Returns an intent when a release on the dragged row commits.
    pub fn handle_pointer(&mut self, row: usize, event: PointerEvent) -> Option<SwipeIntent> {
        match event {
            PointerEvent::Down {
                sample,
                element_width,
            } => {
                self.press(row, sample, element_width);
                None
            }
            PointerEvent::Move(sample) => {
                if self.active_row == Some(row) {
                    self.tracker.update(sample);
                }
                None
            }
            PointerEvent::Up(sample) => {
                if self.active_row != Some(row) {
                    return None;
                }
                self.release(row, sample)
            }
            PointerEvent::Cancelled => {
                self.reset();
                None
            }
        }
    }

    fn press(&mut self, row: usize, sample: GestureSample, row_width: f32) {
        if self.editing_row == Some(row) {
            log::debug!("swipe: row {row} is being edited, drag suppressed");
            return;
        }
        if self.tracker.start(sample) {
            self.active_row = Some(row);
            self.row_width = row_width;
        }
    }

    fn release(&mut self, row: usize, sample: GestureSample) -> Option<SwipeIntent> {
        let threshold = self.row_width * self.commit_fraction;
        let outcome = self.tracker.end(sample, threshold);
        self.active_row = None;

        let intent = match outcome {
            Outcome::Commit(SwipeDirection::Right) => SwipeIntent::Edit(row),
            Outcome::Commit(SwipeDirection::Left) => SwipeIntent::Delete(row),
            Outcome::Cancel => return None,
        };
        log::debug!("swipe: {intent:?}");
        Some(intent)
    }

    fn reset(&mut self) {
        self.tracker.cancel();
        self.active_row = None;
    }

    // -----------------------------------------------------------------------
    // Presentation
    // -----------------------------------------------------------------------

    /// Horizontal translation (px) to render for `row` this frame.
    pub fn row_offset(&self, row: usize) -> f32 {
        if self.active_row == Some(row) {
            self.tracker.offset()
        } else {
            0.0
        }
    }

    /// `true` while `row` follows the finger directly.
    pub fn is_dragging(&self, row: usize) -> bool {
        self.active_row == Some(row) && self.tracker.phase() == GesturePhase::CommittedHorizontal
    }

    /// Animation for `row`; `None` while it is being dragged.
    pub fn transition(&self, row: usize) -> Option<SnapTransition> {
        if self.is_dragging(row) {
            None
        } else {
            Some(SnapTransition::ROW)
        }
    }

    /// Action revealed behind `row`, if it is being dragged sideways.
    pub fn indicator(&self, row: usize) -> Option<SwipeIndicator> {
        if !self.is_dragging(row) {
            return None;
        }
        let dx = self.tracker.offset();
        let width = (dx.abs() - INDICATOR_INSET).max(0.0);
        if dx > 0.0 {
            Some(SwipeIndicator::Edit { width })
        } else if dx < 0.0 {
            Some(SwipeIndicator::Delete { width })
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f32, width: f32) -> PointerEvent {
        PointerEvent::Down {
            sample: GestureSample::new(x, 40.0, 0),
            element_width: width,
        }
    }

    fn mv(x: f32, y: f32, t: u64) -> PointerEvent {
        PointerEvent::Move(GestureSample::new(x, y, t))
    }

    fn up(x: f32, y: f32, t: u64) -> PointerEvent {
        PointerEvent::Up(GestureSample::new(x, y, t))
    }

    fn swipe(c: &mut SwipeActionController, row: usize, from: f32, to: f32) -> Option<SwipeIntent> {
        c.handle_pointer(row, down(from, 300.0));
        c.handle_pointer(row, mv(to, 40.0, 16));
        c.handle_pointer(row, up(to, 40.0, 32))
    }

    #[test]
    fn left_drag_below_threshold_snaps_back() {
        let mut c = SwipeActionController::new();
        // 300px row, 25% threshold = 75px; 70px is not enough.
        assert_eq!(swipe(&mut c, 2, 100.0, 30.0), None);
        assert_eq!(c.row_offset(2), 0.0);
    }

    #[test]
    fn left_drag_past_threshold_requests_delete() {
        let mut c = SwipeActionController::new();
        assert_eq!(swipe(&mut c, 2, 100.0, 20.0), Some(SwipeIntent::Delete(2)));
    }

    #[test]
    fn right_drag_past_threshold_requests_edit() {
        let mut c = SwipeActionController::new();
        assert_eq!(swipe(&mut c, 0, 50.0, 200.0), Some(SwipeIntent::Edit(0)));
    }

    #[test]
    fn paging_distance_is_not_enough_for_an_action() {
        let mut c = SwipeActionController::new();
        // 40px clears the 10% carousel threshold but not the 25% row one.
        assert_eq!(swipe(&mut c, 1, 100.0, 60.0), None);
    }

    #[test]
    fn vertical_scroll_over_row_emits_nothing() {
        let mut c = SwipeActionController::new();
        c.handle_pointer(3, down(100.0, 300.0));
        c.handle_pointer(3, mv(98.0, 90.0, 16));
        c.handle_pointer(3, mv(0.0, 95.0, 32));
        assert_eq!(c.row_offset(3), 0.0);
        assert_eq!(c.handle_pointer(3, up(0.0, 95.0, 48)), None);
    }

    #[test]
    fn editing_row_ignores_swipes() {
        let mut c = SwipeActionController::new();
        c.set_editing(Some(1));
        assert_eq!(swipe(&mut c, 1, 100.0, 0.0), None);
        // Other rows still respond.
        assert_eq!(swipe(&mut c, 2, 100.0, 0.0), Some(SwipeIntent::Delete(2)));
    }

    #[test]
    fn entering_edit_mode_discards_live_drag() {
        let mut c = SwipeActionController::new();
        c.handle_pointer(1, down(100.0, 300.0));
        c.handle_pointer(1, mv(0.0, 40.0, 16));
        c.set_editing(Some(1));
        assert_eq!(c.row_offset(1), 0.0);
        assert_eq!(c.handle_pointer(1, up(0.0, 40.0, 32)), None);
    }

    #[test]
    fn offset_and_indicator_follow_active_row_only() {
        let mut c = SwipeActionController::new();
        c.handle_pointer(5, down(100.0, 300.0));
        c.handle_pointer(5, mv(160.0, 41.0, 16));

        assert_eq!(c.row_offset(5), 60.0);
        assert_eq!(c.row_offset(4), 0.0);
        assert_eq!(c.indicator(5), Some(SwipeIndicator::Edit { width: 48.0 }));
        assert_eq!(c.indicator(4), None);
        assert_eq!(c.transition(5), None);
        assert_eq!(c.transition(4), Some(SnapTransition::ROW));

        c.handle_pointer(5, mv(95.0, 41.0, 32));
        assert_eq!(c.indicator(5), Some(SwipeIndicator::Delete { width: 0.0 }));
    }

    #[test]
    fn release_on_other_row_is_ignored() {
        let mut c = SwipeActionController::new();
        c.handle_pointer(1, down(100.0, 300.0));
        c.handle_pointer(1, mv(0.0, 40.0, 16));
        assert_eq!(c.handle_pointer(2, up(0.0, 40.0, 32)), None);
        assert_eq!(c.handle_pointer(1, up(0.0, 40.0, 48)), Some(SwipeIntent::Delete(1)));
    }

    #[test]
    fn cancelled_pointer_resets() {
        let mut c = SwipeActionController::new();
        c.handle_pointer(1, down(100.0, 300.0));
        c.handle_pointer(1, mv(0.0, 40.0, 16));
        c.handle_pointer(1, PointerEvent::Cancelled);
        assert_eq!(c.row_offset(1), 0.0);
        assert_eq!(c.handle_pointer(1, up(0.0, 40.0, 32)), None);
    }

    #[test]
    fn intent_row_accessor() {
        assert_eq!(SwipeIntent::Edit(7).row(), 7);
        assert_eq!(SwipeIntent::Delete(3).row(), 3);
    }
}
