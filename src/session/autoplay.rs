//! Hands-free mode: announce and repeat each word, then let the user choose
//! what comes next.

use crate::playback::{PlaybackEvent, PlaybackSequencer, RunHandle};

/// Autoplay loop over the word list.
///
/// The caller forwards every [`PlaybackEvent`] to
/// [`handle_event`](Self::handle_event); once the current cycle is over the
/// session reports [`is_awaiting_user`](Self::is_awaiting_user) and the UI
/// offers repeat / previous / next.
pub struct AutoplaySession {
    words: Vec<String>,
    index: usize,
    sequencer: PlaybackSequencer,
    run: Option<RunHandle>,
    awaiting_user: bool,
}

impl AutoplaySession {
    pub fn new(words: Vec<String>, start_index: usize, sequencer: PlaybackSequencer) -> Self {
        let index = start_index.min(words.len().saturating_sub(1));
        Self {
            words,
            index,
            sequencer,
            run: None,
            awaiting_user: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.index).map(String::as_str)
    }

    /// Run of the current cycle, if one was started.
    pub fn run(&self) -> Option<&RunHandle> {
        self.run.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.sequencer.is_playing()
    }

    /// `true` once the current cycle has ended and the user should pick the
    /// next action.
    pub fn is_awaiting_user(&self) -> bool {
        self.awaiting_user
    }

    pub fn can_go_previous(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.index + 1 < self.words.len()
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Start a cycle for the current word, replacing any running one.
    /// Returns `None` when there are no words.
    pub fn start(&mut self) -> Option<RunHandle> {
        let word = self.words.get(self.index)?;
        self.awaiting_user = false;
        let run = self
            .sequencer
            .play_autoplay(word, self.index, self.words.len());
        log::debug!("autoplay: word {} of {} ({})", self.index + 1, self.words.len(), run.id());
        self.run = Some(run.clone());
        Some(run)
    }

    pub fn repeat(&mut self) -> Option<RunHandle> {
        self.start()
    }

    /// Move to the next word and start its cycle.  `None` at the last word.
    pub fn next(&mut self) -> Option<RunHandle> {
        if !self.can_go_next() {
            return None;
        }
        self.index += 1;
        self.start()
    }

    /// Move to the previous word and start its cycle.  `None` at the first.
    pub fn previous(&mut self) -> Option<RunHandle> {
        if !self.can_go_previous() {
            return None;
        }
        self.index -= 1;
        self.start()
    }

    pub fn stop(&mut self) {
        self.sequencer.stop();
        self.awaiting_user = false;
    }

    /// Track sequencer notifications.  Returns `true` when the event made the
    /// session start awaiting the user.  Events from superseded runs are
    /// ignored.
    pub fn handle_event(&mut self, event: &PlaybackEvent) -> bool {
        let PlaybackEvent::AwaitingUserAction { run } = event else {
            return false;
        };
        if self.run.as_ref().map(RunHandle::id) != Some(*run) {
            return false;
        }
        self.awaiting_user = true;
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
