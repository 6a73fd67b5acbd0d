//! Speech output: the device-level capability the playback engine drives.
//!
//! # Overview
//!
//! [`SpeechPort`] is the only interface through which audio is produced.  It
//! is object-safe and `Send + Sync` so it can be held behind an
//! `Arc<dyn SpeechPort>`; the [`PlaybackSequencer`](crate::playback::PlaybackSequencer)
//! is its sole caller.
//!
//! | Backend            | Renders via                          |
//! |--------------------|--------------------------------------|
//! | [`CommandSpeech`]  | external TTS program (`espeak-ng`)   |
//! | [`DisabledSpeech`] | nothing, reports itself unavailable  |
//!
//! `MockSpeech` (available under `#[cfg(test)]`) records utterances with a
//! fixed duration so playback timing can be tested on virtual time.

pub mod command;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::config::{SpeechBackend, SpeechConfig};

pub use command::CommandSpeech;

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

/// Errors reported while rendering an utterance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    /// Speech output is not available on this platform.
    #[error("speech output unavailable: {0}")]
    Unavailable(String),

    /// The utterance could not be rendered.
    #[error("speech failed: {0}")]
    Failed(String),

    /// The utterance was cut short by [`SpeechPort::stop_all`].
    #[error("speech interrupted")]
    Interrupted,
}

// ---------------------------------------------------------------------------
// StartSignal
// ---------------------------------------------------------------------------

/// One-shot notification that an utterance has become audible.
#[derive(Debug)]
pub struct StartSignal(oneshot::Sender<()>);

impl StartSignal {
    /// A signal and the receiver that resolves when it fires.  The receiver
    /// resolves with an error if the signal is dropped unfired.
    pub fn new() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (Self(tx), rx)
    }

    /// Fire the signal.  Nobody listening is fine.
    pub fn notify(self) {
        let _ = self.0.send(());
    }
}

// ---------------------------------------------------------------------------
// SpeechPort trait
// ---------------------------------------------------------------------------

/// Capability to speak a string in a given language.
///
/// # Contract
///
/// - `speak` starts rendering immediately, fires `started` once audio has
///   begun, and resolves `Ok(())` once the utterance has *finished*, or
///   `Err(_)` if it failed.  A failure before audio begins drops `started`
///   unfired.
/// - `stop_all` interrupts whatever is being spoken.  It is idempotent, safe
///   to call when nothing is playing, and never causes a late `Ok(())` for
///   the interrupted utterance.
/// - Dropping a pending `speak` future abandons the utterance.
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Whether speech output works at all on this platform.
    fn is_available(&self) -> bool;

    /// Speak `text` in the BCP-47 `language` and wait for it to finish.
    async fn speak(
        &self,
        text: &str,
        language: &str,
        started: StartSignal,
    ) -> Result<(), SpeechError>;

    /// Interrupt any in-flight utterance.
    fn stop_all(&self);
}

// Compile-time assertion: Box<dyn SpeechPort> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechPort>) {}
};

// ---------------------------------------------------------------------------
// DisabledSpeech
// ---------------------------------------------------------------------------

/// Backend used when speech is switched off in the settings.
#[derive(Debug, Default)]
pub struct DisabledSpeech;

#[async_trait]
impl SpeechPort for DisabledSpeech {
    fn is_available(&self) -> bool {
        false
    }

    async fn speak(
        &self,
        _text: &str,
        _language: &str,
        _started: StartSignal,
    ) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable("speech is disabled".into()))
    }

    fn stop_all(&self) {}
}

/// Build the configured speech backend.
pub fn from_config(config: &SpeechConfig) -> Arc<dyn SpeechPort> {
    match config.backend {
        SpeechBackend::Command => Arc::new(CommandSpeech::from_config(config)),
        SpeechBackend::Disabled => Arc::new(DisabledSpeech),
    }
}

// ---------------------------------------------------------------------------
// MockSpeech  (test-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
pub use mock::MockSpeech;

#[cfg(test)]
mod mock {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{SpeechError, SpeechPort, StartSignal};

    #[derive(Debug, Default)]
    struct Recorded {
        spoken: Vec<(String, String)>,
        stop_calls: usize,
    }

    /// Test double: every utterance becomes audible after `start_delay`,
    /// then takes `utterance` of (virtual) time.  Utterances are recorded as
    /// `(text, language)` when `speak` is called.
    #[derive(Debug)]
    pub struct MockSpeech {
        available: bool,
        start_delay: Duration,
        utterance: Duration,
        fail_on: Option<usize>,
        recorded: Mutex<Recorded>,
    }

    impl MockSpeech {
        /// Available backend whose utterances take `utterance` each.
        pub fn new(utterance: Duration) -> Self {
            Self {
                available: true,
                start_delay: Duration::ZERO,
                utterance,
                fail_on: None,
                recorded: Mutex::new(Recorded::default()),
            }
        }

        /// Backend that reports itself unavailable.
        pub fn unavailable() -> Self {
            Self {
                available: false,
                ..Self::new(Duration::ZERO)
            }
        }

        /// Backend that takes `start_delay` to begin each utterance.
        pub fn with_start_delay(start_delay: Duration, utterance: Duration) -> Self {
            Self {
                start_delay,
                ..Self::new(utterance)
            }
        }

        /// Backend whose `call`-th (0-based) utterance fails before starting.
        pub fn failing_on(call: usize, utterance: Duration) -> Self {
            Self {
                fail_on: Some(call),
                ..Self::new(utterance)
            }
        }

        pub fn spoken(&self) -> Vec<(String, String)> {
            self.recorded.lock().unwrap().spoken.clone()
        }

        pub fn spoken_texts(&self) -> Vec<String> {
            self.spoken().into_iter().map(|(text, _)| text).collect()
        }

        pub fn stop_calls(&self) -> usize {
            self.recorded.lock().unwrap().stop_calls
        }
    }

    #[async_trait]
    impl SpeechPort for MockSpeech {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn speak(
            &self,
            text: &str,
            language: &str,
            started: StartSignal,
        ) -> Result<(), SpeechError> {
            let call = {
                let mut rec = self.recorded.lock().unwrap();
                rec.spoken.push((text.to_string(), language.to_string()));
                rec.spoken.len() - 1
            };
            if self.fail_on == Some(call) {
                return Err(SpeechError::Failed("mock failure".into()));
            }
            if !self.start_delay.is_zero() {
                tokio::time::sleep(self.start_delay).await;
            }
            started.notify();
            tokio::time::sleep(self.utterance).await;
            Ok(())
        }

        fn stop_all(&self) {
            self.recorded.lock().unwrap().stop_calls += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
