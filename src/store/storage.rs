//! Storage port: the seam between the in-memory store and wherever its
//! state survives between sessions.

use crate::domain::{Note, NoteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by storage adapters.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but does not hold a valid snapshot.
    #[error("failed to parse store at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot could not be serialized.
    #[error("failed to serialize store: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The adapter refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

fn first_id() -> NoteId {
    NoteId::FIRST
}

/// Everything the store needs to resume a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default = "first_id")]
    pub next_id: NoteId,
    #[serde(default)]
    pub active_id: Option<NoteId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<DateTime<Utc>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            next_id: NoteId::FIRST,
            active_id: None,
            last_saved: None,
        }
    }
}

/// Where a [`NoteStore`](super::NoteStore) loads from and saves to.
///
/// Implementations only move whole snapshots; they know nothing about
/// individual notes.
pub trait NoteStorage {
    /// Loads the last saved snapshot, or `None` when nothing was saved yet.
    fn load(&mut self) -> Result<Option<Snapshot>, StorageError>;

    /// Replaces the saved snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StorageError>;
}

/// Session-lifetime storage that keeps the last snapshot in memory.
///
/// Saves can be switched to fail, which is how callers exercise the
/// save-failure paths of the editor.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: Option<Snapshot>,
    fail_saves: bool,
    saves: usize,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage that already holds `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            ..Self::default()
        }
    }

    /// Makes every following save fail (or succeed again).
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Returns the last successfully saved snapshot.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Returns how many saves succeeded.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl NoteStorage for MemoryStorage {
    fn load(&mut self) -> Result<Option<Snapshot>, StorageError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StorageError> {
        if self.fail_saves {
            return Err(StorageError::Unavailable(
                "memory storage is refusing writes".to_string(),
            ));
        }
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}
