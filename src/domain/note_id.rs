//! Sequential note identifier with parsing and serde support.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a note within one store.
///
/// Ids are handed out by [`NoteStore`](crate::store::NoteStore) from a
/// monotonically increasing counter starting at 1. An id is never handed
/// out twice by the same store, even after its note is deleted.
///
/// # Examples
///
/// ```
/// use jotter::domain::NoteId;
///
/// let id: NoteId = "#7".parse().unwrap();
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(u64);

impl NoteId {
    /// The first id a fresh store hands out.
    pub const FIRST: NoteId = NoteId(1);

    /// Wraps a raw id value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the id following this one.
    pub(crate) fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId({})", self.0)
    }
}

/// Error returned when parsing an invalid note id string.
#[derive(Debug, Clone)]
pub struct ParseNoteIdError {
    value: String,
    reason: String,
}

impl ParseNoteIdError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseNoteIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid note id '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ParseNoteIdError {}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    /// Parses `"12"` or `"#12"`. Zero is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        let value: u64 = digits.parse().map_err(|e: std::num::ParseIntError| ParseNoteIdError {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        if value == 0 {
            return Err(ParseNoteIdError {
                value: s.to_string(),
                reason: "ids start at 1".to_string(),
            });
        }

        Ok(Self(value))
    }
}
