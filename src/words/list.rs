//! The user's word list, persisted as a JSON array of strings.
//!
//! | Platform | Path |
//! |----------|------|
//! | Windows  | `%APPDATA%\word-drill\word-list.json` |
//! | macOS    | `~/Library/Application Support/word-drill/word-list.json` |
//! | Linux    | `~/.config/word-drill/word-list.json` |

use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// WordListError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("no word at position {index} (list has {len} words)")]
    OutOfRange { index: usize, len: usize },

    #[error("word is empty")]
    EmptyWord,

    #[error("cannot access word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode word list: {0}")]
    Encode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Edit rules
// ---------------------------------------------------------------------------

/// How the user finished editing a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommit {
    /// Pressed the confirm button.
    Confirm,
    /// Pressed Enter in the text field.
    Enter,
}

/// What [`WordList::commit_edit`] did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Empty value confirmed: the row was removed.
    Removed,
    /// The row now holds the new value; editing ends.
    Saved,
    /// The row was saved and a blank row inserted at this index; editing
    /// continues there.
    ContinueAt(usize),
    /// Enter on an empty value: nothing changed, editing continues.
    Unchanged,
}

// ---------------------------------------------------------------------------
// WordList
// ---------------------------------------------------------------------------

/// Ordered list of words.
///
/// Mutations only touch memory; call [`save`](Self::save) to persist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
    path: Option<PathBuf>,
}

impl WordList {
    /// In-memory list with no backing file.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            path: None,
        }
    }

    /// Load the list stored at `path`.
    ///
    /// A missing file gives an empty list.  A file that is not a JSON array
    /// of strings is logged and also treated as empty, so a corrupt file
    /// never locks the user out.
    pub fn load_from(path: &Path) -> Result<Self, WordListError> {
        let words = match std::fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str::<Vec<String>>(&data) {
                Ok(words) => words,
                Err(e) => {
                    log::warn!("words: {} is malformed ({e}), starting empty", path.display());
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(WordListError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        log::debug!("words: loaded {} words from {}", words.len(), path.display());

        Ok(Self {
            words,
            path: Some(path.to_path_buf()),
        })
    }

    /// Write the list back to the file it was loaded from.  Lists built with
    /// [`from_words`](Self::from_words) have nowhere to go and are skipped.
    pub fn save(&self) -> Result<(), WordListError> {
        match &self.path {
            Some(path) => self.save_to(path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), WordListError> {
        let io_err = |source| WordListError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_string_pretty(&self.words)?;
        std::fs::write(path, data).map_err(io_err)?;
        log::debug!("words: saved {} words to {}", self.words.len(), path.display());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Append `word` (trimmed) and return its index.
    pub fn add(&mut self, word: &str) -> Result<usize, WordListError> {
        let word = non_empty(word)?;
        self.words.push(word.to_string());
        Ok(self.words.len() - 1)
    }

    /// Remove and return the word at `index`.
    pub fn remove(&mut self, index: usize) -> Result<String, WordListError> {
        self.check(index)?;
        Ok(self.words.remove(index))
    }

    /// Replace the word at `index` with `word` (trimmed).
    pub fn replace(&mut self, index: usize, word: &str) -> Result<(), WordListError> {
        self.check(index)?;
        let word = non_empty(word)?;
        self.words[index] = word.to_string();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Apply the result of editing row `index` in place.
    ///
    /// ```rust
    /// use word_drill::words::{EditCommit, EditOutcome, WordList};
    ///
    /// let mut list = WordList::from_words(["一", "二"]);
    /// let outcome = list.commit_edit(0, "壹", EditCommit::Enter).unwrap();
    /// assert_eq!(outcome, EditOutcome::ContinueAt(1));
    /// assert_eq!(list.words(), ["壹", "", "二"]);
    /// ```
    pub fn commit_edit(
        &mut self,
        index: usize,
        value: &str,
        commit: EditCommit,
    ) -> Result<EditOutcome, WordListError> {
        self.check(index)?;
        let value = value.trim();

        let outcome = match (value.is_empty(), commit) {
            (true, EditCommit::Confirm) => {
                self.words.remove(index);
                EditOutcome::Removed
            }
            (true, EditCommit::Enter) => EditOutcome::Unchanged,
            (false, EditCommit::Confirm) => {
                self.words[index] = value.to_string();
                EditOutcome::Saved
            }
            (false, EditCommit::Enter) => {
                self.words[index] = value.to_string();
                self.words.insert(index + 1, String::new());
                EditOutcome::ContinueAt(index + 1)
            }
        };
        Ok(outcome)
    }

    fn check(&self, index: usize) -> Result<(), WordListError> {
        if index < self.words.len() {
            Ok(())
        } else {
            Err(WordListError::OutOfRange {
                index,
                len: self.words.len(),
            })
        }
    }
}

fn non_empty(word: &str) -> Result<&str, WordListError> {
    let word = word.trim();
    if word.is_empty() {
        Err(WordListError::EmptyWord)
    } else {
        Ok(word)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
