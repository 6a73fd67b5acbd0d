//! Single-pointer drag classifier.
//!
//! [`GestureTracker`] ingests the samples of one gesture and decides, once,
//! whether the user is dragging horizontally (paging / row actions) or
//! scrolling vertically.  The axis is committed on the first move that
//! satisfies one of these rules and never re-evaluated for that gesture:
//!
//! ```text
//! |dy| > vertical_threshold  and |dy| >= |dx|   ─▶ CommittedVertical   (scroll passthrough)
//! elapsed > horizontal_commit or |dx| >  |dy|   ─▶ CommittedHorizontal (offset = dx)
//! otherwise                                     ─▶ Tracking            (offset = 0)
//! ```
//!
//! The vertical rule is checked first, so a drag that has moved further
//! sideways than down can never be handed to scrolling.  The time rule lets a
//! slow, deliberate drag that starts near 45° still page.

use super::GestureSample;
use crate::config::GestureConfig;

// ---------------------------------------------------------------------------
// TrackerConfig
// ---------------------------------------------------------------------------

/// Axis-disambiguation thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Vertical travel (px) required before a drag can become a scroll.
    pub vertical_threshold: f32,
    /// Elapsed milliseconds after which an undecided drag turns horizontal.
    pub horizontal_commit_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            vertical_threshold: 10.0,
            horizontal_commit_ms: 1_000,
        }
    }
}

impl From<&GestureConfig> for TrackerConfig {
    fn from(config: &GestureConfig) -> Self {
        Self {
            vertical_threshold: config.vertical_threshold_px,
            horizontal_commit_ms: config.horizontal_commit_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// GesturePhase / GestureState
// ---------------------------------------------------------------------------

/// Lifecycle of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No pointer is down.
    Idle,
    /// Pointer is down; axis not decided yet.
    Tracking,
    /// Drag is horizontal; offsets are reported.
    CommittedHorizontal,
    /// Drag is a vertical scroll; further motion is ignored.
    CommittedVertical,
}

/// Live state of the gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    pub origin_x: f32,
    pub origin_y: f32,
    pub current_x: f32,
    pub current_y: f32,
    pub start_time_ms: u64,
    pub phase: GesturePhase,
}

impl GestureState {
    fn new(sample: GestureSample) -> Self {
        Self {
            origin_x: sample.x,
            origin_y: sample.y,
            current_x: sample.x,
            current_y: sample.y,
            start_time_ms: sample.timestamp_ms,
            phase: GesturePhase::Tracking,
        }
    }

    /// Horizontal displacement from the origin.
    pub fn dx(&self) -> f32 {
        self.current_x - self.origin_x
    }

    /// Vertical displacement from the origin.
    pub fn dy(&self) -> f32 {
        self.current_y - self.origin_y
    }
}

// ---------------------------------------------------------------------------
// DragUpdate / Outcome
// ---------------------------------------------------------------------------

/// Result of feeding one move sample to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// No gesture is active.
    Inactive,
    /// Axis still undecided; render no movement.
    Pending,
    /// Horizontal drag with the current displacement.
    Horizontal { offset: f32 },
    /// Vertical scroll; let the platform scroll natively.
    Scroll,
}

impl DragUpdate {
    /// Horizontal offset to render; zero unless the drag is horizontal.
    pub fn offset(&self) -> f32 {
        match self {
            DragUpdate::Horizontal { offset } => *offset,
            _ => 0.0,
        }
    }
}

/// Horizontal direction of a committed drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Pointer moved towards negative x.
    Left,
    /// Pointer moved towards positive x.
    Right,
}

impl SwipeDirection {
    /// `-1` for left, `+1` for right.
    pub fn sign(&self) -> i8 {
        match self {
            SwipeDirection::Left => -1,
            SwipeDirection::Right => 1,
        }
    }
}

/// How a released gesture resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Horizontal travel exceeded the threshold.
    Commit(SwipeDirection),
    /// Anything else: snap back, no action.
    Cancel,
}

// ---------------------------------------------------------------------------
// GestureTracker
// ---------------------------------------------------------------------------

/// State machine for one pointer interaction at a time.
///
/// # Example
///
/// ```rust
/// use word_drill::gesture::{GestureSample, GestureTracker, Outcome, SwipeDirection};
///
/// let mut tracker = GestureTracker::default();
/// tracker.start(GestureSample::new(100.0, 50.0, 0));
/// tracker.update(GestureSample::new(20.0, 52.0, 80));
/// let outcome = tracker.end(GestureSample::new(20.0, 52.0, 90), 75.0);
/// assert_eq!(outcome, Outcome::Commit(SwipeDirection::Left));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    config: TrackerConfig,
    state: Option<GestureState>,
}

impl GestureTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Begin a gesture at `sample`.
    ///
    /// Returns `false` (and changes nothing) when a gesture is already live.
    pub fn start(&mut self, sample: GestureSample) -> bool {
        if self.state.is_some() {
            log::debug!("gesture: pointer-down ignored, gesture already active");
            return false;
        }
        self.state = Some(GestureState::new(sample));
        true
    }

    /// Feed a move sample and classify the drag.
    pub fn update(&mut self, sample: GestureSample) -> DragUpdate {
        let config = self.config;
        let Some(state) = self.state.as_mut() else {
            return DragUpdate::Inactive;
        };

        match state.phase {
            GesturePhase::CommittedVertical => return DragUpdate::Scroll,
            GesturePhase::CommittedHorizontal => {
                state.current_x = sample.x;
                state.current_y = sample.y;
                return DragUpdate::Horizontal { offset: state.dx() };
            }
            GesturePhase::Idle | GesturePhase::Tracking => {}
        }

        state.current_x = sample.x;
        state.current_y = sample.y;

        let dx = state.dx().abs();
        let dy = state.dy().abs();
        let elapsed = sample.timestamp_ms.saturating_sub(state.start_time_ms);

        if dy > config.vertical_threshold && dy >= dx {
            log::debug!("gesture: committed vertical (dx={dx}, dy={dy})");
            state.phase = GesturePhase::CommittedVertical;
            DragUpdate::Scroll
        } else if elapsed > config.horizontal_commit_ms || dx > dy {
            log::debug!("gesture: committed horizontal (dx={dx}, dy={dy}, {elapsed} ms)");
            state.phase = GesturePhase::CommittedHorizontal;
            DragUpdate::Horizontal { offset: state.dx() }
        } else {
            DragUpdate::Pending
        }
    }

    /// Release the pointer at `sample` and resolve the gesture.
    ///
    /// `threshold` is the horizontal travel, in the same units as the
    /// samples, that must be exceeded for a commit.  Callers derive it from
    /// the element width so behaviour scales with element size.
    pub fn end(&mut self, sample: GestureSample, threshold: f32) -> Outcome {
        let Some(mut state) = self.state.take() else {
            return Outcome::Cancel;
        };
        if state.phase != GesturePhase::CommittedHorizontal {
            return Outcome::Cancel;
        }

        state.current_x = sample.x;
        state.current_y = sample.y;
        let dx = state.dx();

        if dx.abs() > threshold {
            if dx > 0.0 {
                Outcome::Commit(SwipeDirection::Right)
            } else {
                Outcome::Commit(SwipeDirection::Left)
            }
        } else {
            Outcome::Cancel
        }
    }

    /// Discard the gesture without an outcome.
    pub fn cancel(&mut self) {
        self.state = None;
    }

    /// Current phase; `Idle` when no gesture is live.
    pub fn phase(&self) -> GesturePhase {
        self.state.map_or(GesturePhase::Idle, |s| s.phase)
    }

    /// Snapshot of the live gesture, if any.
    pub fn state(&self) -> Option<&GestureState> {
        self.state.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Offset to render right now; zero unless committed horizontal.
    pub fn offset(&self) -> f32 {
        match self.state {
            Some(s) if s.phase == GesturePhase::CommittedHorizontal => s.dx(),
            _ => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
