//! Timed, cancellable speech playback.
//!
//! # Architecture
//!
//! ```text
//! StudySession / AutoplaySession
//!        │ play_single / play_autoplay / cancel / stop
//!        ▼
//! PlaybackSequencer ──builds──▶ PlaybackPlan (immutable steps)
//!        │
//!        ├─ tokio::spawn(execute)  ──▶ SpeechPort::speak, sleep(hold)
//!        │
//!        ├─ RunHandle (watch)      ←── polled or awaited by the UI
//!        └─ PlaybackEvent (mpsc)   ←── drained by the UI loop
//! ```
//!
//! Playback never returns errors.  A failed or unsupported request resolves
//! into [`RunState::Failed`] on its handle.

pub mod plan;
pub mod run;
pub mod sequencer;

pub use plan::{PlanKind, PlaybackPlan, PlaybackStep, AUTOPLAY_REPETITIONS};
pub use run::{RunHandle, RunId, RunState, RunStatus};
pub use sequencer::{PlaybackEvent, PlaybackSequencer};
