//! Study page: page through the words one at a time and play each on demand.

use crate::config::GestureConfig;
use crate::gesture::{CarouselController, PointerEvent};
use crate::playback::{PlaybackSequencer, RunHandle};

/// Carousel over the word list plus single-word playback.
///
/// Every navigation stops whatever is playing, so speech never belongs to a
/// word that is no longer on screen.
pub struct StudySession {
    words: Vec<String>,
    carousel: CarouselController,
    sequencer: PlaybackSequencer,
}

impl StudySession {
    pub fn new(
        words: Vec<String>,
        start_index: usize,
        gestures: &GestureConfig,
        sequencer: PlaybackSequencer,
    ) -> Self {
        let carousel = CarouselController::from_config(words.len(), start_index, gestures);
        Self {
            words,
            carousel,
            sequencer,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn index(&self) -> usize {
        self.carousel.index()
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.carousel.index()).map(String::as_str)
    }

    /// Header text, e.g. `"3 of 5"`.
    pub fn position_label(&self) -> String {
        if self.words.is_empty() {
            return "There are currently no words to learn".into();
        }
        format!("{} of {}", self.carousel.index() + 1, self.words.len())
    }

    pub fn can_go_previous(&self) -> bool {
        self.carousel.can_go_previous()
    }

    pub fn can_go_next(&self) -> bool {
        self.carousel.can_go_next()
    }

    /// Carousel state for rendering (offset, transition).
    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    pub fn is_playing(&self) -> bool {
        self.sequencer.is_playing()
    }

    /// `false` when the play control should be disabled.
    pub fn is_playback_supported(&self) -> bool {
        self.sequencer.is_supported()
    }

    // -----------------------------------------------------------------------
    // Playback
    // -----------------------------------------------------------------------

    /// Stop if something is playing, otherwise play the current word.
    pub fn toggle_playback(&mut self) -> Option<RunHandle> {
        if self.sequencer.is_playing() {
            self.sequencer.stop();
            return None;
        }
        let word = self.words.get(self.carousel.index())?;
        Some(self.sequencer.play_single(word))
    }

    pub fn stop(&mut self) {
        self.sequencer.stop();
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn next(&mut self) -> Option<usize> {
        let moved = self.carousel.next();
        self.sequencer.stop();
        moved
    }

    pub fn previous(&mut self) -> Option<usize> {
        let moved = self.carousel.previous();
        self.sequencer.stop();
        moved
    }

    /// Jump straight to `index` (clamped).
    pub fn go_to(&mut self, index: usize) -> Option<usize> {
        let moved = self.carousel.go_to(index);
        self.sequencer.stop();
        moved
    }

    /// Feed a pointer event to the carousel.  A committed page change stops
    /// playback like the buttons do.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<usize> {
        let moved = self.carousel.handle_pointer(event);
        if moved.is_some() {
            self.sequencer.stop();
        }
        moved
    }

    /// Replace the word list, e.g. after it was edited elsewhere.
    pub fn set_words(&mut self, words: Vec<String>) {
        self.carousel.set_item_count(words.len());
        self.words = words;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
