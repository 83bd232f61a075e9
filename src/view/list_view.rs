//! Filtered list projection of the store.

use crate::domain::{Note, NoteId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of content characters shown in a card preview.
pub const PREVIEW_CHARS: usize = 120;

/// Search term and category filter applied to the list.
///
/// A blank search term and no category means "unfiltered", which only
/// changes the empty-state message; every note passes either way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub search: String,
    pub category: Option<String>,
}

impl ListFilter {
    /// Creates an unfiltered filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Sets the exact category to keep. A blank string clears it.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        let category = category.trim();
        self.category = if category.is_empty() {
            None
        } else {
            Some(category.to_string())
        };
        self
    }

    /// True when a search term or category is set.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.category.is_some()
    }

    /// True when `note` passes both the search term and the category.
    ///
    /// The search term is trimmed and matched case-insensitively as a
    /// substring of title, content or category. The category must match
    /// exactly.
    pub fn matches(&self, note: &Note) -> bool {
        let term = self.search.trim().to_lowercase();
        let matches_search = term.is_empty()
            || note.title().to_lowercase().contains(&term)
            || note.content().to_lowercase().contains(&term)
            || note.category().to_lowercase().contains(&term);

        let matches_category = self
            .category
            .as_deref()
            .is_none_or(|category| note.category() == category);

        matches_search && matches_category
    }
}

/// Why a list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The collection itself is empty.
    NoNotes,
    /// Notes exist but none pass the filter.
    NoMatches,
}

impl EmptyState {
    /// The message shown in place of the list.
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoNotes => "No notes yet. Create a new note to get started.",
            EmptyState::NoMatches => "No notes match your search criteria.",
        }
    }
}

/// One row of the note list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteCard {
    pub id: NoteId,
    pub title: String,
    pub preview: String,
    pub category: String,
    pub updated: String,
    pub updated_at: DateTime<Utc>,
    pub active: bool,
}

/// The list as displayed: matching notes in store order plus counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteListView {
    pub cards: Vec<NoteCard>,
    pub shown: usize,
    pub total: usize,
    pub filtered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<EmptyState>,
}

impl NoteListView {
    /// Projects `notes` (in store order) through `filter`.
    ///
    /// `active` marks the highlighted card; `now` anchors the relative
    /// date labels.
    pub fn build(
        notes: &[Note],
        filter: &ListFilter,
        active: Option<NoteId>,
        now: DateTime<Utc>,
    ) -> Self {
        let filtered = filter.is_active();
        let cards: Vec<NoteCard> = notes
            .iter()
            .filter(|note| !filtered || filter.matches(note))
            .map(|note| NoteCard {
                id: note.id(),
                title: note.title().to_string(),
                preview: preview(note.content()),
                category: note.category().to_string(),
                updated: relative_date(note.updated_at(), now),
                updated_at: note.updated_at(),
                active: active == Some(note.id()),
            })
            .collect();

        let empty = match (cards.is_empty(), filtered) {
            (false, _) => None,
            (true, false) => Some(EmptyState::NoNotes),
            (true, true) => Some(EmptyState::NoMatches),
        };

        Self {
            shown: cards.len(),
            total: notes.len(),
            filtered,
            empty,
            cards,
        }
    }

    /// `(N notes)` when everything is shown, `(x of N notes)` otherwise.
    pub fn count_label(&self) -> String {
        if self.shown == self.total {
            format!("({} notes)", self.total)
        } else {
            format!("({} of {} notes)", self.shown, self.total)
        }
    }
}

/// First [`PREVIEW_CHARS`] characters of `content` on one line, with
/// `...` when cut short and `No content` when empty.
pub fn preview(content: &str) -> String {
    let mut text: String = content
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if text.is_empty() {
        return "No content".to_string();
    }
    if content.chars().count() > PREVIEW_CHARS {
        text.push_str("...");
    }
    text
}

/// Human label for how long ago `at` was: `Today`, `Yesterday`,
/// `N days ago` within a week, otherwise the date.
pub fn relative_date(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - at).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        _ => at.format("%Y-%m-%d").to_string(),
    }
}
