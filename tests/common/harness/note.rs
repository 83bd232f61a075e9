//! Builder for test notes with sensible defaults.

use chrono::{DateTime, Duration, Utc};
use jotter::domain::NoteDraft;

/// Builder for creating test notes with sensible defaults.
///
/// Timestamps default to now, with a fluent API for setting the
/// other fields.
#[derive(Debug, Clone)]
pub struct TestNote {
    title: String,
    content: String,
    category: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl TestNote {
    /// Creates a new test note with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            title: title.into(),
            content: String::new(),
            category: "General".to_string(),
            created: now,
            updated: now,
        }
    }

    /// Sets the body content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Moves both timestamps `days` into the past.
    pub fn days_old(mut self, days: i64) -> Self {
        let at = Utc::now() - Duration::days(days);
        self.created = at;
        self.updated = at;
        self
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Converts to the draft the store imports.
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft::new(self.title.clone())
            .content(self.content.clone())
            .category(self.category.clone())
            .timestamps(self.created, self.updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_defaults() {
        let note = TestNote::new("Defaults");
        let draft = note.to_draft();
        assert_eq!(draft.title, "Defaults");
        assert_eq!(draft.category, "General");
        assert!(draft.content.is_empty());
    }

    #[test]
    fn test_note_builder_fields() {
        let draft = TestNote::new("Built")
            .content("body")
            .category("Work")
            .days_old(3)
            .to_draft();
        assert_eq!(draft.content, "body");
        assert_eq!(draft.category, "Work");
        assert!(draft.created_at < Utc::now() - Duration::days(2));
    }
}
