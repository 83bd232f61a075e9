//! Edit buffer: the form fields bound to the active note.

use crate::domain::{DEFAULT_CATEGORY, Note};
use serde::Serialize;

/// Transient copies of the title, content and category fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl EditBuffer {
    /// Loads the fields of `note`.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title().to_string(),
            content: note.content().to_string(),
            category: note.category().to_string(),
        }
    }

    /// Counts words, characters and lines of the content field.
    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.content)
    }
}

/// Word, character and line counts of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
    pub lines: usize,
}

impl TextStats {
    /// Counts `text`. Words are whitespace-separated runs; an empty text
    /// still has one line.
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            characters: text.chars().count(),
            lines: text.split('\n').count(),
        }
    }
}

impl std::fmt::Display for TextStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} words • {} characters • {} lines",
            self.words, self.characters, self.lines
        )
    }
}
