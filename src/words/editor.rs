//! Editing session over a [`WordList`]: one row at a time can be in text-edit
//! mode, and row swipes turn into edits or deletions.

use crate::config::GestureConfig;
use crate::gesture::{PointerEvent, SwipeActionController, SwipeIntent};

use super::list::{EditCommit, EditOutcome, WordList, WordListError};

/// List owner for the edit page.
#[derive(Debug)]
pub struct WordEditor {
    list: WordList,
    swipe: SwipeActionController,
    editing: Option<usize>,
    draft: String,
}

impl WordEditor {
    pub fn new(list: WordList, gestures: &GestureConfig) -> Self {
        Self {
            list,
            swipe: SwipeActionController::from_config(gestures),
            editing: None,
            draft: String::new(),
        }
    }

    pub fn list(&self) -> &WordList {
        &self.list
    }

    pub fn into_list(self) -> WordList {
        self.list
    }

    pub fn swipe(&self) -> &SwipeActionController {
        &self.swipe
    }

    /// Row currently in text-edit mode.
    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    /// Text in the edit field.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, value: impl Into<String>) {
        self.draft = value.into();
    }

    // -----------------------------------------------------------------------
    // Edit mode
    // -----------------------------------------------------------------------

    /// Put row `index` into edit mode with its current text as the draft.
    pub fn start_edit(&mut self, index: usize) -> Result<(), WordListError> {
        let word = self
            .list
            .get(index)
            .ok_or(WordListError::OutOfRange {
                index,
                len: self.list.len(),
            })?
            .to_string();
        self.set_editing(Some(index));
        self.draft = word;
        Ok(())
    }

    /// Leave edit mode without touching the list.
    pub fn cancel_edit(&mut self) {
        self.set_editing(None);
        self.draft.clear();
    }

    /// Commit the draft for the row being edited.  Returns `None` when no
    /// row is in edit mode.
    pub fn commit(&mut self, commit: EditCommit) -> Result<Option<EditOutcome>, WordListError> {
        let Some(index) = self.editing else {
            return Ok(None);
        };
        let outcome = self.list.commit_edit(index, &self.draft, commit)?;
        match outcome {
            EditOutcome::Removed | EditOutcome::Saved => self.cancel_edit(),
            EditOutcome::ContinueAt(next) => {
                self.set_editing(Some(next));
                self.draft.clear();
            }
            EditOutcome::Unchanged => {}
        }
        Ok(Some(outcome))
    }

    fn set_editing(&mut self, row: Option<usize>) {
        self.editing = row;
        self.swipe.set_editing(row);
    }

    // -----------------------------------------------------------------------
    // List operations
    // -----------------------------------------------------------------------

    /// Append `word` and open it for editing.
    pub fn add_word(&mut self, word: &str) -> Result<usize, WordListError> {
        let index = self.list.add(word)?;
        self.start_edit(index)?;
        Ok(index)
    }

    /// Delete row `index`, keeping the edit-mode row pointed at the same word.
    pub fn delete(&mut self, index: usize) -> Result<String, WordListError> {
        let removed = self.list.remove(index)?;
        match self.editing {
            Some(row) if row == index => self.cancel_edit(),
            Some(row) if row > index => self.set_editing(Some(row - 1)),
            _ => {}
        }
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.cancel_edit();
    }

    // -----------------------------------------------------------------------
    // Gestures
    // -----------------------------------------------------------------------

    /// Feed a pointer event for `row` and apply any resulting swipe intent.
    pub fn handle_pointer(
        &mut self,
        row: usize,
        event: PointerEvent,
    ) -> Result<Option<SwipeIntent>, WordListError> {
        let Some(intent) = self.swipe.handle_pointer(row, event) else {
            return Ok(None);
        };
        self.apply(intent)?;
        Ok(Some(intent))
    }

    /// Carry out a swipe intent on the list.
    pub fn apply(&mut self, intent: SwipeIntent) -> Result<(), WordListError> {
        match intent {
            SwipeIntent::Edit(row) => self.start_edit(row),
            SwipeIntent::Delete(row) => {
                let word = self.delete(row)?;
                log::info!("words: deleted {word:?}");
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
