//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.  Every struct is
//! `#[serde(default)]`, so a hand-edited file only needs the keys it changes.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// GestureConfig
// ---------------------------------------------------------------------------

/// Thresholds used to interpret single-pointer drags.
///
/// Commit thresholds are fractions of the dragged element's width so the
/// same setting behaves identically on a phone and on a tablet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Vertical travel (px) after which a drag may be handed to scrolling.
    pub vertical_threshold_px: f32,
    /// Milliseconds after which an ambiguous drag is treated as horizontal.
    pub horizontal_commit_ms: u64,
    /// Fraction of the carousel width a drag must exceed to change page.
    pub carousel_commit_fraction: f32,
    /// Fraction of a row width a drag must exceed to trigger edit/delete.
    pub swipe_commit_fraction: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            vertical_threshold_px: 10.0,
            horizontal_commit_ms: 1_000,
            carousel_commit_fraction: 0.10,
            swipe_commit_fraction: 0.25,
        }
    }
}

// ---------------------------------------------------------------------------
// PlaybackConfig
// ---------------------------------------------------------------------------

/// Languages and pacing for spoken playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// BCP-47 tag the drilled words are spoken in.
    pub word_language: String,
    /// BCP-47 tag for the autoplay position announcement.
    pub announcement_language: String,
    /// Pause after each autoplay utterance, in milliseconds.
    pub hold_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            word_language: "zh-CN".into(),
            announcement_language: "en-US".into(),
            hold_ms: 3_000,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Selects which speech backend renders utterances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechBackend {
    /// Spawn an external text-to-speech program per utterance.
    Command,
    /// No audio output; playback controls are disabled.
    Disabled,
}

impl Default for SpeechBackend {
    fn default() -> Self {
        Self::Command
    }
}

/// Settings for the speech output device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Which backend to use.
    pub backend: SpeechBackend,
    /// Program name or path used by the `Command` backend.
    pub program: String,
    /// Relative speaking rate (1.0 = the program's normal speed).
    pub rate: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            backend: SpeechBackend::default(),
            program: "espeak-ng".into(),
            rate: 0.8,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use word_drill::config::{AppConfig, AppPaths};
///
/// let paths = AppPaths::new();
/// let mut config = AppConfig::load_or_default(&paths);
/// config.playback.hold_ms = 2_000;
/// config.save_to(&paths.settings_file).unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gesture: GestureConfig,
    pub playback: PlaybackConfig,
    pub speech: SpeechConfig,
}

impl AppConfig {
    /// Load `settings.toml` from `paths`, falling back to defaults (with a
    /// warning) when it cannot be read or parsed.
    pub fn load_or_default(paths: &AppPaths) -> Self {
        Self::load_from(&paths.settings_file).unwrap_or_else(|e| {
            log::warn!("config: {e:#}; using defaults");
            Self::default()
        })
    }

    /// Load from `path`.  A missing file is not an error and yields the
    /// defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(original, loaded);
    }

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.gesture.vertical_threshold_px, 10.0);
        assert_eq!(cfg.gesture.horizontal_commit_ms, 1_000);
        assert_eq!(cfg.gesture.carousel_commit_fraction, 0.10);
        assert_eq!(cfg.gesture.swipe_commit_fraction, 0.25);
        assert_eq!(cfg.playback.word_language, "zh-CN");
        assert_eq!(cfg.playback.announcement_language, "en-US");
        assert_eq!(cfg.playback.hold_ms, 3_000);
        assert_eq!(cfg.speech.backend, SpeechBackend::Command);
        assert_eq!(cfg.speech.program, "espeak-ng");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[playback]\nhold_ms = 1500\n").expect("write");

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.playback.hold_ms, 1_500);
        assert_eq!(cfg.playback.word_language, "zh-CN");
        assert_eq!(cfg.gesture, GestureConfig::default());
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.gesture.swipe_commit_fraction = 0.4;
        cfg.playback.word_language = "ja-JP".into();
        cfg.speech.backend = SpeechBackend::Disabled;
        cfg.speech.program = "/usr/local/bin/say".into();

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.gesture.swipe_commit_fraction, 0.4);
        assert_eq!(loaded.playback.word_language, "ja-JP");
        assert_eq!(loaded.speech.backend, SpeechBackend::Disabled);
        assert_eq!(loaded.speech.program, "/usr/local/bin/say");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "gesture = 12").expect("write");

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn load_or_default_recovers_from_broken_file() {
        let dir = tempdir().expect("temp dir");
        let paths = AppPaths::in_dir(dir.path());
        std::fs::write(&paths.settings_file, "speech = [").expect("write");

        assert_eq!(AppConfig::load_or_default(&paths), AppConfig::default());
    }
}
