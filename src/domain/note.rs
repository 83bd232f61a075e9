//! Note entity, import drafts, and the defaults applied when saving.

use crate::domain::NoteId;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Title stored when a note is saved with an empty or whitespace-only title.
pub const DEFAULT_TITLE: &str = "Untitled Note";

/// Category given to notes that do not name one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Returns the current time truncated to millisecond precision.
///
/// Timestamps are kept at millisecond precision so that what is written to
/// an export or a snapshot compares equal to what is read back.
pub fn now_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Returns a timestamp strictly later than `previous`.
///
/// Normally this is just the current time; when the clock has not moved
/// past `previous` (two saves within one millisecond, or a clock step
/// backwards) it is `previous` plus one millisecond.
pub fn timestamp_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now_timestamp();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

/// Trims a title and falls back to [`DEFAULT_TITLE`] when nothing is left.
pub fn normalize_title(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Trims a category and falls back to [`DEFAULT_CATEGORY`] when nothing is left.
pub fn normalize_category(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// A single user note.
///
/// Notes are only mutated through [`NoteStore`](crate::store::NoteStore),
/// which keeps these invariants:
/// - `title` and `category` are non-empty after any save or import
/// - `updated_at >= created_at`
/// - `updated_at` strictly increases with every save
///
/// Serialized with camelCase keys (`createdAt`, `updatedAt`), the same
/// shape used by export documents and store snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    id: NoteId,
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default = "default_category")]
    category: String,
    #[serde(default = "now_timestamp")]
    created_at: DateTime<Utc>,
    #[serde(default = "now_timestamp")]
    updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a blank note with default title and category.
    pub fn new(id: NoteId, at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            content: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    /// Builds a note from an import draft, normalizing title, category and
    /// timestamp order.
    pub fn from_draft(id: NoteId, draft: NoteDraft) -> Self {
        let mut note = Self {
            id,
            title: draft.title,
            content: draft.content,
            category: draft.category,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        };
        note.normalize();
        note
    }

    /// Returns the note's identifier.
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's body text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the note's category.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns when the note was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the note was last saved.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Converts the note back into an id-less draft.
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            category: self.category.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Applies a save. The caller supplies `at`, already ordered after the
    /// previous `updated_at`.
    pub(crate) fn apply_edit(&mut self, title: &str, content: &str, category: &str, at: DateTime<Utc>) {
        self.title = normalize_title(title);
        self.content = content.to_string();
        self.category = normalize_category(category);
        self.updated_at = at.max(self.created_at);
    }

    pub(crate) fn set_id(&mut self, id: NoteId) {
        self.id = id;
    }

    /// Restores the invariants on data that came from outside the store.
    pub(crate) fn normalize(&mut self) {
        self.title = normalize_title(&self.title);
        self.category = normalize_category(&self.category);
        if self.updated_at < self.created_at {
            self.updated_at = self.created_at;
        }
    }
}

/// A note that has not been given an id yet.
///
/// Produced by import parsing and handed to
/// [`NoteStore::merge_all`](crate::store::NoteStore::merge_all) or
/// [`NoteStore::replace_all`](crate::store::NoteStore::replace_all), which
/// assign fresh ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoteDraft {
    /// Creates a draft with the given title, empty content, the default
    /// category, and both timestamps set to now.
    pub fn new(title: impl Into<String>) -> Self {
        let now = now_timestamp();
        Self {
            title: title.into(),
            content: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets both timestamps.
    pub fn timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }
}
