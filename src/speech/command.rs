//! Speech through an external text-to-speech program.
//!
//! Each utterance spawns one process (`espeak-ng` by default):
//!
//! ```text
//! <program> -v <voice> -s <words-per-minute> -- <text>
//! ```
//!
//! The utterance counts as started once the process has spawned and as
//! finished when it exits with status 0.
//! [`stop_all`](SpeechPort::stop_all) bumps a generation counter that every
//! pending `speak` watches; the pending call then returns
//! [`SpeechError::Interrupted`] and its process is killed on drop.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::watch;

use super::{SpeechError, SpeechPort, StartSignal};
use crate::config::SpeechConfig;

/// Program speaking rate at `rate = 1.0`, in words per minute.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

// ---------------------------------------------------------------------------
// CommandSpeech
// ---------------------------------------------------------------------------

/// [`SpeechPort`] backed by an external TTS executable.
#[derive(Debug)]
pub struct CommandSpeech {
    program: String,
    words_per_minute: u32,
    available: bool,
    stop_tx: watch::Sender<u64>,
}

impl CommandSpeech {
    /// Use `program` at the given relative `rate`.
    ///
    /// Availability is probed once here; a missing program is logged and the
    /// backend reports itself unavailable from then on.
    pub fn new(program: impl Into<String>, rate: f32) -> Self {
        let program = program.into();
        let available = match find_program(&program) {
            Some(path) => {
                log::info!("speech: using {}", path.display());
                true
            }
            None => {
                log::warn!("speech: '{program}' not found, audio playback disabled");
                false
            }
        };
        let (stop_tx, _) = watch::channel(0);

        Self {
            program,
            words_per_minute: words_per_minute(rate),
            available,
            stop_tx,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(config.program.clone(), config.rate)
    }
}

#[async_trait]
impl SpeechPort for CommandSpeech {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn speak(
        &self,
        text: &str,
        language: &str,
        started: StartSignal,
    ) -> Result<(), SpeechError> {
        if !self.available {
            return Err(SpeechError::Unavailable(self.program.clone()));
        }

        // Only stops requested after this point interrupt this utterance.
        let mut stop_rx = self.stop_tx.subscribe();
        stop_rx.borrow_and_update();

        let mut child = Command::new(&self.program)
            .arg("-v")
            .arg(voice_for(language))
            .arg("-s")
            .arg(self.words_per_minute.to_string())
            .arg("--")
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechError::Failed(format!("cannot start {}: {e}", self.program)))?;

        log::debug!("speech: speaking {text:?} ({language})");
        started.notify();

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|e| SpeechError::Failed(e.to_string()))?;
                if status.success() {
                    Ok(())
                } else {
                    Err(SpeechError::Failed(format!("{} exited with {status}", self.program)))
                }
            }
            _ = stop_rx.changed() => {
                log::debug!("speech: utterance interrupted");
                Err(SpeechError::Interrupted)
            }
        }
    }

    fn stop_all(&self) {
        self.stop_tx.send_modify(|generation| *generation = generation.wrapping_add(1));
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn words_per_minute(rate: f32) -> u32 {
    let rate = if rate.is_finite() && rate > 0.0 { rate } else { 1.0 };
    (BASE_WORDS_PER_MINUTE * rate).round().clamp(80.0, 450.0) as u32
}

/// Map a BCP-47 tag onto an espeak-ng voice name.
fn voice_for(language: &str) -> String {
    let lower = language.to_ascii_lowercase();
    if lower == "zh" || lower.starts_with("zh-") || lower == "cmn" {
        return "cmn".into();
    }
    lower
}

/// Resolve `program` to an executable path, searching `PATH` for bare names.
fn find_program(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return direct.is_file().then(|| direct.to_path_buf());
    }

    let search = std::env::var_os("PATH")?;
    std::env::split_paths(&search)
        .flat_map(|dir| {
            let plain = dir.join(program);
            let exe = dir.join(format!("{program}.exe"));
            [plain, exe]
        })
        .find(|candidate| candidate.is_file())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
