//! Word-list management: storage, editing rules, and the edit page's
//! swipe-to-edit / swipe-to-delete handling.

pub mod editor;
pub mod list;

pub use editor::WordEditor;
pub use list::{EditCommit, EditOutcome, WordList, WordListError};
