//! Paged carousel over an ordered list of items.
//!
//! [`CarouselController`] owns the authoritative current index and a
//! [`GestureTracker`].  Item count and the externally requested start index
//! are pushed in through setters rather than captured at gesture start, so a
//! list that changes mid-drag is always clamped against its current size.
//!
//! Rendering is width-independent: the whole strip of pages is translated by
//! [`visual_offset_percent`](CarouselController::visual_offset_percent),
//! i.e. `-index * 100` plus the live drag expressed as a percentage of the
//! container width.

use super::tracker::{GesturePhase, GestureTracker, Outcome, SwipeDirection, TrackerConfig};
use super::{GestureSample, PointerEvent, SnapTransition};
use crate::config::GestureConfig;

/// Default page-change threshold: 10 % of the container width.
pub const DEFAULT_COMMIT_FRACTION: f32 = 0.10;

/// Carousel paging state plus pointer-event delegation.
///
/// # Example
///
/// ```rust
/// use word_drill::gesture::CarouselController;
///
/// let mut carousel = CarouselController::new(5, 2);
/// assert_eq!(carousel.next(), Some(3));
/// assert_eq!(carousel.next(), Some(4));
/// assert_eq!(carousel.next(), None); // clamped, no wraparound
/// assert_eq!(carousel.index(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct CarouselController {
    tracker: GestureTracker,
    commit_fraction: f32,
    item_count: usize,
    index: usize,
    start_index: usize,
    container_width: f32,
}

impl CarouselController {
    /// Create a carousel over `item_count` items starting at `start_index`
    /// (clamped) with default thresholds.
    pub fn new(item_count: usize, start_index: usize) -> Self {
        Self::with_config(
            item_count,
            start_index,
            TrackerConfig::default(),
            DEFAULT_COMMIT_FRACTION,
        )
    }

    /// Create a carousel with explicit tracker thresholds and commit fraction.
    pub fn with_config(
        item_count: usize,
        start_index: usize,
        tracker: TrackerConfig,
        commit_fraction: f32,
    ) -> Self {
        let mut carousel = Self {
            tracker: GestureTracker::new(tracker),
            commit_fraction,
            item_count,
            index: 0,
            start_index,
            container_width: 0.0,
        };
        carousel.index = carousel.clamp(start_index);
        carousel
    }

    /// Create a carousel from the persisted gesture settings.
    pub fn from_config(item_count: usize, start_index: usize, config: &GestureConfig) -> Self {
        Self::with_config(
            item_count,
            start_index,
            TrackerConfig::from(config),
            config.carousel_commit_fraction,
        )
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// `true` while a horizontal drag is being rendered live.
    pub fn is_dragging(&self) -> bool {
        self.tracker.phase() == GesturePhase::CommittedHorizontal
    }

    /// Translation of the page strip as a percentage of the container width.
    pub fn visual_offset_percent(&self) -> f32 {
        let resting = -(self.index as f32) * 100.0;
        if self.container_width > 0.0 {
            resting + self.tracker.offset() / self.container_width * 100.0
        } else {
            resting
        }
    }

    /// Animation to apply to the page strip this frame; `None` while the
    /// finger is driving the offset directly.
    pub fn transition(&self) -> Option<SnapTransition> {
        if self.is_dragging() {
            None
        } else {
            Some(SnapTransition::CAROUSEL)
        }
    }

    pub fn can_go_previous(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.index + 1 < self.item_count
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Jump to `index` (clamped).  Returns the new index when it changed.
    pub fn go_to(&mut self, index: usize) -> Option<usize> {
        let target = self.clamp(index);
        self.move_to(target)
    }

    /// Advance one item; no-op at the last item.
    pub fn next(&mut self) -> Option<usize> {
        if !self.can_go_next() {
            return None;
        }
        self.move_to(self.index + 1)
    }

    /// Go back one item; no-op at the first item.
    pub fn previous(&mut self) -> Option<usize> {
        if !self.can_go_previous() {
            return None;
        }
        self.move_to(self.index - 1)
    }

    /// Update the number of items, re-clamping the current index.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.index = self.clamp(self.index);
    }

    /// Re-synchronise with an externally supplied start index.
    ///
    /// When it differs from the previously supplied one the index jumps
    /// there immediately and any in-flight drag is discarded.
    pub fn sync_start_index(&mut self, start_index: usize) {
        if start_index == self.start_index {
            return;
        }
        self.start_index = start_index;
        self.tracker.cancel();
        self.index = self.clamp(start_index);
        log::debug!("carousel: resynced to index {}", self.index);
    }

    // -----------------------------------------------------------------------
    // Pointer delegation
    // -----------------------------------------------------------------------

    /// Feed one pointer event.  Returns the new index when a release commits
    /// a page change.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<usize> {
        match event {
            PointerEvent::Down {
                sample,
                element_width,
            } => {
                if self.tracker.start(sample) {
                    self.container_width = element_width;
                }
                None
            }
            PointerEvent::Move(sample) => {
                self.tracker.update(sample);
                None
            }
            PointerEvent::Up(sample) => self.release(sample),
            PointerEvent::Cancelled => {
                self.tracker.cancel();
                None
            }
        }
    }

    fn release(&mut self, sample: GestureSample) -> Option<usize> {
        let threshold = self.container_width * self.commit_fraction;
        match self.tracker.end(sample, threshold) {
            // Dragging right reveals the previous page.
            Outcome::Commit(SwipeDirection::Right) => self.previous(),
            Outcome::Commit(SwipeDirection::Left) => self.next(),
            Outcome::Cancel => None,
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn clamp(&self, index: usize) -> usize {
        index.min(self.item_count.saturating_sub(1))
    }

    fn move_to(&mut self, index: usize) -> Option<usize> {
        if index == self.index {
            return None;
        }
        self.index = index;
        Some(index)
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
            sample: GestureSample::new(x, 100.0, 0),
            element_width: width,
        }
    }

    fn mv(x: f32, y: f32, t: u64) -> PointerEvent {
        PointerEvent::Move(GestureSample::new(x, y, t))
    }

    fn up(x: f32, y: f32, t: u64) -> PointerEvent {
        PointerEvent::Up(GestureSample::new(x, y, t))
    }

    // ---- bounds ---

    #[test]
    fn next_clamps_at_last_index() {
        let mut c = CarouselController::new(5, 2);
        let seen: Vec<usize> = (0..4)
            .map(|_| {
                c.next();
                c.index()
            })
            .collect();
        assert_eq!(seen, vec![3, 4, 4, 4]);
    }

    #[test]
    fn previous_clamps_at_zero() {
        let mut c = CarouselController::new(3, 1);
        assert_eq!(c.previous(), Some(0));
        assert_eq!(c.previous(), None);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn go_to_clamps_out_of_range() {
        let mut c = CarouselController::new(4, 0);
        assert_eq!(c.go_to(99), Some(3));
        assert_eq!(c.go_to(3), None);
    }

    #[test]
    fn start_index_is_clamped() {
        let c = CarouselController::new(3, 10);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn empty_carousel_stays_at_zero() {
        let mut c = CarouselController::new(0, 0);
        assert_eq!(c.next(), None);
        assert_eq!(c.previous(), None);
        assert_eq!(c.go_to(5), None);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn index_stays_in_range_under_mixed_calls() {
        let mut c = CarouselController::new(4, 0);
        for step in 0..50usize {
            match step % 5 {
                0 | 1 => {
                    c.next();
                }
                2 => {
                    c.previous();
                }
                3 => {
                    c.go_to(step * 7);
                }
                _ => c.set_item_count(1 + step % 6),
            }
            assert!(c.index() < c.item_count().max(1));
        }
    }

    #[test]
    fn shrinking_item_count_reclamps_index() {
        let mut c = CarouselController::new(10, 8);
        c.set_item_count(3);
        assert_eq!(c.index(), 2);
    }

    // ---- drag ---

    #[test]
    fn drag_left_past_threshold_advances() {
        let mut c = CarouselController::new(5, 1);
        c.handle_pointer(down(200.0, 300.0));
        c.handle_pointer(mv(160.0, 101.0, 16));
        assert_eq!(c.handle_pointer(up(160.0, 101.0, 32)), Some(2));
    }

    #[test]
    fn drag_right_past_threshold_goes_back() {
        let mut c = CarouselController::new(5, 1);
        c.handle_pointer(down(100.0, 300.0));
        c.handle_pointer(mv(140.0, 100.0, 16));
        assert_eq!(c.handle_pointer(up(140.0, 100.0, 32)), Some(0));
    }

    #[test]
    fn short_drag_snaps_back() {
        let mut c = CarouselController::new(5, 1);
        c.handle_pointer(down(100.0, 300.0));
        c.handle_pointer(mv(80.0, 100.0, 16)); // 20px < 30px threshold
        assert_eq!(c.handle_pointer(up(80.0, 100.0, 32)), None);
        assert_eq!(c.index(), 1);
        assert_eq!(c.visual_offset_percent(), -100.0);
        assert_eq!(c.transition(), Some(SnapTransition::CAROUSEL));
    }

    #[test]
    fn drag_at_edge_is_a_noop() {
        let mut c = CarouselController::new(2, 1);
        c.handle_pointer(down(200.0, 300.0));
        c.handle_pointer(mv(50.0, 100.0, 16));
        assert_eq!(c.handle_pointer(up(50.0, 100.0, 32)), None);
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn live_offset_tracks_drag_as_percentage() {
        let mut c = CarouselController::new(5, 2);
        c.handle_pointer(down(200.0, 400.0));
        c.handle_pointer(mv(100.0, 100.0, 16));
        assert!((c.visual_offset_percent() - (-225.0)).abs() < 1e-4);
        assert!(c.is_dragging());
        assert_eq!(c.transition(), None);
    }

    #[test]
    fn vertical_scroll_produces_no_offset_or_navigation() {
        let mut c = CarouselController::new(5, 2);
        c.handle_pointer(down(200.0, 400.0));
        c.handle_pointer(mv(195.0, 160.0, 16));
        c.handle_pointer(mv(20.0, 170.0, 32));
        assert_eq!(c.visual_offset_percent(), -200.0);
        assert_eq!(c.handle_pointer(up(20.0, 170.0, 48)), None);
    }

    #[test]
    fn cancelled_pointer_discards_drag() {
        let mut c = CarouselController::new(5, 2);
        c.handle_pointer(down(200.0, 400.0));
        c.handle_pointer(mv(100.0, 100.0, 16));
        c.handle_pointer(PointerEvent::Cancelled);
        assert_eq!(c.visual_offset_percent(), -200.0);
        assert_eq!(c.handle_pointer(up(0.0, 100.0, 32)), None);
    }

    #[test]
    fn resync_jumps_and_discards_drag() {
        let mut c = CarouselController::new(5, 0);
        c.handle_pointer(down(200.0, 400.0));
        c.handle_pointer(mv(100.0, 100.0, 16));
        c.sync_start_index(3);
        assert_eq!(c.index(), 3);
        assert_eq!(c.visual_offset_percent(), -300.0);
        // Release of the discarded gesture does nothing.
        assert_eq!(c.handle_pointer(up(0.0, 100.0, 32)), None);
        assert_eq!(c.index(), 3);
    }

    #[test]
    fn resync_with_same_start_index_keeps_position() {
        let mut c = CarouselController::new(5, 1);
        c.next();
        c.sync_start_index(1);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn item_count_change_mid_drag_is_respected() {
        let mut c = CarouselController::new(5, 3);
        c.handle_pointer(down(200.0, 300.0));
        c.handle_pointer(mv(100.0, 100.0, 16));
        c.set_item_count(4);
        // Index 3 is now the last item, so a left commit cannot advance.
        assert_eq!(c.handle_pointer(up(100.0, 100.0, 32)), None);
        assert_eq!(c.index(), 3);
    }
}
