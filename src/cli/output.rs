//! Output format types for CLI commands.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Note, NoteId};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Pretty-printed JSON of the wrapped data.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A full note in `show` and `new` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDetail {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub words: usize,
    pub characters: usize,
    pub lines: usize,
}

impl NoteDetail {
    pub fn from_note(note: &Note) -> Self {
        let stats = crate::editor::TextStats::of(note.content());
        Self {
            id: note.id(),
            title: note.title().to_string(),
            content: note.content().to_string(),
            category: note.category().to_string(),
            created_at: note.created_at(),
            updated_at: note.updated_at(),
            words: stats.words,
            characters: stats.characters,
            lines: stats.lines,
        }
    }
}

/// A category with its note count.
#[derive(Debug, Serialize)]
pub struct CategoryListing {
    pub name: String,
    pub count: usize,
}
