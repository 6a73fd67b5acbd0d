//! Immutable playback schedules.
//!
//! A [`PlaybackPlan`] is built fresh for every playback request and never
//! modified afterwards; the running state lives in
//! [`RunHandle`](super::RunHandle).

use std::time::Duration;

use crate::config::PlaybackConfig;

/// Times the word is spoken during one autoplay cycle.
pub const AUTOPLAY_REPETITIONS: usize = 3;

/// One scheduled utterance and the pause that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackStep {
    pub text: String,
    pub language: String,
    pub hold_after: Duration,
}

impl PlaybackStep {
    pub fn new(text: impl Into<String>, language: impl Into<String>, hold_after: Duration) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            hold_after,
        }
    }
}

/// What kind of request produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
    /// Speak the word once, on demand.
    Single,
    /// Announce the position, then repeat the word; the user picks what
    /// happens next when it ends.
    Autoplay,
}

/// Ordered, immutable list of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackPlan {
    kind: PlanKind,
    steps: Vec<PlaybackStep>,
}

impl PlaybackPlan {
    /// Speak `word` once in the configured word language, with no hold.
    pub fn single(word: &str, config: &PlaybackConfig) -> Self {
        let steps = spoken_form(word)
            .map(|text| vec![PlaybackStep::new(text, &config.word_language, Duration::ZERO)])
            .unwrap_or_default();
        Self {
            kind: PlanKind::Single,
            steps,
        }
    }

    /// Announce `position` of `total` (0-based position), then speak `word`
    /// [`AUTOPLAY_REPETITIONS`] times, each utterance followed by the
    /// configured hold.
    ///
    /// ```rust
    /// use word_drill::config::PlaybackConfig;
    /// use word_drill::playback::PlaybackPlan;
    ///
    /// let plan = PlaybackPlan::autoplay("你好", 1, 5, &PlaybackConfig::default());
    /// assert_eq!(plan.len(), 4);
    /// assert_eq!(plan.steps()[0].text, "You are on word 2 out of 5");
    /// ```
    pub fn autoplay(word: &str, position: usize, total: usize, config: &PlaybackConfig) -> Self {
        let hold = Duration::from_millis(config.hold_ms);
        let steps = match spoken_form(word) {
            Some(text) => {
                let mut steps = Vec::with_capacity(1 + AUTOPLAY_REPETITIONS);
                steps.push(PlaybackStep::new(
                    announcement(position, total),
                    &config.announcement_language,
                    hold,
                ));
                steps.extend(
                    (0..AUTOPLAY_REPETITIONS)
                        .map(|_| PlaybackStep::new(text, &config.word_language, hold)),
                );
                steps
            }
            None => Vec::new(),
        };
        Self {
            kind: PlanKind::Autoplay,
            steps,
        }
    }

    pub fn kind(&self) -> PlanKind {
        self.kind
    }

    pub fn steps(&self) -> &[PlaybackStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` when there is nothing to speak (e.g. an empty word).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn spoken_form(word: &str) -> Option<&str> {
    let trimmed = word.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn announcement(position: usize, total: usize) -> String {
    format!("You are on word {} out of {}", position + 1, total)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_plan_has_one_step_without_hold() {
        let plan = PlaybackPlan::single("你好", &PlaybackConfig::default());
        assert_eq!(plan.kind(), PlanKind::Single);
        assert_eq!(
            plan.steps(),
            &[PlaybackStep::new("你好", "zh-CN", Duration::ZERO)]
        );
    }

    #[test]
    fn autoplay_is_announcement_then_three_repetitions() {
        let config = PlaybackConfig::default();
        let plan = PlaybackPlan::autoplay("谢谢", 0, 3, &config);
        let hold = Duration::from_millis(3_000);

        assert_eq!(plan.kind(), PlanKind::Autoplay);
        assert_eq!(plan.len(), 1 + AUTOPLAY_REPETITIONS);
        assert_eq!(
            plan.steps()[0],
            PlaybackStep::new("You are on word 1 out of 3", "en-US", hold)
        );
        for step in &plan.steps()[1..] {
            assert_eq!(step, &PlaybackStep::new("谢谢", "zh-CN", hold));
        }
    }

    #[test]
    fn autoplay_uses_configured_hold_and_languages() {
        let config = PlaybackConfig {
            word_language: "ja-JP".into(),
            announcement_language: "en-GB".into(),
            hold_ms: 500,
        };
        let plan = PlaybackPlan::autoplay("水", 4, 10, &config);
        assert_eq!(plan.steps()[0].language, "en-GB");
        assert_eq!(plan.steps()[0].text, "You are on word 5 out of 10");
        assert!(plan.steps()[1..].iter().all(|s| s.language == "ja-JP"));
        assert!(plan
            .steps()
            .iter()
            .all(|s| s.hold_after == Duration::from_millis(500)));
    }

    #[test]
    fn word_is_trimmed() {
        let plan = PlaybackPlan::single("  猫 \n", &PlaybackConfig::default());
        assert_eq!(plan.steps()[0].text, "猫");
    }

    #[test]
    fn empty_word_yields_empty_plan() {
        let config = PlaybackConfig::default();
        assert!(PlaybackPlan::single("   ", &config).is_empty());
        assert!(PlaybackPlan::autoplay("", 0, 1, &config).is_empty());
    }
}
