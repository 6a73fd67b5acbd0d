//! Word Drill: vocabulary drilling with swipe navigation and spoken playback.
//!
//! The crate is split into a gesture engine and a playback engine plus the
//! collaborators a front-end needs around them:
//!
//! * [`gesture`]: drag interpretation, carousel paging, row swipe actions.
//! * [`playback`]: timed, cancellable sequences of spoken utterances.
//! * [`speech`]: the [`speech::SpeechPort`] contract and its adapters.
//! * [`words`]: the persisted word list.
//! * [`session`]: study and autoplay flows that wire the above together.
//! * [`config`]: settings and platform paths.

pub mod config;
pub mod gesture;
pub mod playback;
pub mod session;
pub mod speech;
pub mod words;
