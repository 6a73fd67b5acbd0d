//! Gesture engine: turns single-pointer drags into paging and row actions.
//!
//! # Architecture
//!
//! ```text
//! PointerEvent (down / move / up / cancelled)
//!        │
//!        ▼
//! GestureTracker          classify: pending │ horizontal(dx) │ vertical scroll
//!        │
//!        ├─▶ CarouselController      commit → previous() / next()  → Navigate(index)
//!        │                           live   → visual_offset_percent()
//!        │
//!        └─▶ SwipeActionController   commit → SwipeIntent::Edit / Delete(row)
//!                                    live   → row_offset(row), indicator(row)
//! ```
//!
//! Every controller owns exactly one tracker, so at most one gesture is live
//! per controller; a second pointer-down while a gesture is active is ignored.

pub mod carousel;
pub mod swipe;
pub mod tracker;

use std::time::Duration;

pub use carousel::CarouselController;
pub use swipe::{SwipeActionController, SwipeIndicator, SwipeIntent};
pub use tracker::{
    DragUpdate, GesturePhase, GestureState, GestureTracker, Outcome, SwipeDirection,
    TrackerConfig,
};

// ---------------------------------------------------------------------------
// GestureSample
// ---------------------------------------------------------------------------

/// One raw pointer position and its capture time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Horizontal position in device-independent units.
    pub x: f32,
    /// Vertical position in device-independent units.
    pub y: f32,
    /// Capture time in milliseconds on any monotonic clock.
    pub timestamp_ms: u64,
}

impl GestureSample {
    pub fn new(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }
}

// ---------------------------------------------------------------------------
// PointerEvent
// ---------------------------------------------------------------------------

/// Pointer input delivered by the platform for the single active pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed on an element `element_width` units wide.
    Down {
        sample: GestureSample,
        element_width: f32,
    },
    /// Pointer moved while pressed.
    Move(GestureSample),
    /// Pointer released.
    Up(GestureSample),
    /// The platform aborted the interaction.
    Cancelled,
}

// ---------------------------------------------------------------------------
// SnapTransition
// ---------------------------------------------------------------------------

/// Eased animation the presentation layer should apply when an element
/// settles after a release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTransition {
    /// Animation length.
    pub duration: Duration,
    /// CSS-style cubic-bezier control points `(x1, y1, x2, y2)`.
    pub easing: (f32, f32, f32, f32),
}

impl SnapTransition {
    const EASING: (f32, f32, f32, f32) = (0.27, 1.06, 0.18, 1.00);

    /// Settle animation for carousel pages.
    pub const CAROUSEL: SnapTransition = SnapTransition {
        duration: Duration::from_millis(750),
        easing: Self::EASING,
    };

    /// Settle animation for swiped list rows.
    pub const ROW: SnapTransition = SnapTransition {
        duration: Duration::from_millis(350),
        easing: Self::EASING,
    };
}
