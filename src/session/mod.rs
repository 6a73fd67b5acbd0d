//! Page-level sessions that tie gestures, word list and playback together.
//!
//! | Session            | Drives                                            |
//! |--------------------|---------------------------------------------------|
//! | [`StudySession`]   | carousel navigation + play/stop of one word        |
//! | [`AutoplaySession`]| announce, repeat three times, then wait for user   |
//!
//! Each session owns its [`PlaybackSequencer`](crate::playback::PlaybackSequencer);
//! the sequencer's event receiver stays with whoever runs the UI loop.

pub mod autoplay;
pub mod study;

pub use autoplay::AutoplaySession;
pub use study::StudySession;
