//! Configuration module for Word Drill.
//!
//! [`AppConfig`] groups one section per subsystem (`[gesture]`, `[playback]`,
//! `[speech]`) and persists as TOML; [`AppPaths`] says where.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, GestureConfig, PlaybackConfig, SpeechBackend, SpeechConfig};
