//! The canonical note collection.

use super::storage::{NoteStorage, Snapshot, StorageError};
use crate::domain::{Note, NoteDraft, NoteId, now_timestamp, timestamp_after};
use log::{debug, info, warn};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised by store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The id does not name a note in the live collection.
    #[error("note not found: {id}")]
    NotFound { id: NoteId },
}

/// Owns the notes, the id counter, and the active-note reference.
///
/// Order of [`list`](Self::list) is most recently created or imported
/// first. Saves never reorder the collection.
///
/// Mutating methods only change memory. Callers decide when to write
/// through the storage port with [`persist`](Self::persist).
#[derive(Debug)]
pub struct NoteStore<S: NoteStorage> {
    notes: Vec<Note>,
    next_id: NoteId,
    active: Option<NoteId>,
    storage: S,
}

impl<S: NoteStorage> NoteStore<S> {
    // ===========================================
    // Lifecycle
    // ===========================================

    /// Loads the store from `storage`.
    ///
    /// Missing note fields get their defaults, the id counter is raised
    /// above every loaded id, duplicate ids are replaced with fresh ones,
    /// and an active id that no longer names a note is dropped.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the snapshot cannot be loaded.
    pub fn init(mut storage: S) -> Result<Self, StorageError> {
        let snapshot = storage.load()?.unwrap_or_default();

        let max_loaded = snapshot.notes.iter().map(Note::id).max();
        let next_id = match max_loaded {
            Some(max) if max >= snapshot.next_id => max.successor(),
            _ => snapshot.next_id,
        };

        let mut store = Self {
            notes: Vec::with_capacity(snapshot.notes.len()),
            next_id,
            active: None,
            storage,
        };

        let mut seen = HashSet::new();
        for mut note in snapshot.notes {
            note.normalize();
            if !seen.insert(note.id()) {
                let fresh = store.allocate_id();
                warn!(
                    "event=store_load module=store status=repaired duplicate_id={} new_id={}",
                    note.id(),
                    fresh
                );
                note.set_id(fresh);
                seen.insert(fresh);
            }
            store.notes.push(note);
        }

        store.active = snapshot.active_id.filter(|id| store.contains(*id));

        info!(
            "event=store_init module=store status=ok notes={} next_id={}",
            store.notes.len(),
            store.next_id
        );
        Ok(store)
    }

    /// Writes the current state through the storage port.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let snapshot = self.snapshot();
        match self.storage.save(&snapshot) {
            Ok(()) => {
                debug!(
                    "event=store_persist module=store status=ok notes={}",
                    snapshot.notes.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!("event=store_persist module=store status=error error={err}");
                Err(err)
            }
        }
    }

    /// Persists one last time and hands the storage back.
    pub fn teardown(mut self) -> Result<S, StorageError> {
        self.persist()?;
        info!(
            "event=store_teardown module=store status=ok notes={}",
            self.notes.len()
        );
        Ok(self.storage)
    }

    /// Builds the snapshot that [`persist`](Self::persist) would write.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            notes: self.notes.clone(),
            next_id: self.next_id,
            active_id: self.active,
            last_saved: Some(now_timestamp()),
        }
    }

    /// Returns the storage adapter.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the storage adapter mutably.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    // ===========================================
    // Queries
    // ===========================================

    /// Returns the notes in collection order.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    /// Looks up one note.
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == id)
    }

    /// Returns true when `id` names a live note.
    pub fn contains(&self, id: NoteId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the active note id, if any.
    pub fn active_id(&self) -> Option<NoteId> {
        self.active
    }

    /// Returns the active note, if any.
    pub fn active(&self) -> Option<&Note> {
        self.active.and_then(|id| self.get(id))
    }

    /// Number of notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// True when the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The id the next created or imported note will get.
    pub fn next_id(&self) -> NoteId {
        self.next_id
    }

    /// Distinct categories in first-seen collection order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.notes
            .iter()
            .map(Note::category)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    // ===========================================
    // Single-note operations
    // ===========================================

    /// Creates a blank note at the front of the collection and makes it active.
    pub fn create(&mut self) -> &Note {
        let id = self.allocate_id();
        self.notes.insert(0, Note::new(id, now_timestamp()));
        self.active = Some(id);
        info!("event=note_create module=store status=ok id={id}");
        &self.notes[0]
    }

    /// Saves new field values into an existing note.
    ///
    /// The title is trimmed and falls back to "Untitled Note"; an empty
    /// category falls back to "General". `updated_at` becomes strictly
    /// later than its previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when `id` is not in the collection;
    /// nothing is changed in that case.
    pub fn update(
        &mut self,
        id: NoteId,
        title: &str,
        content: &str,
        category: &str,
    ) -> Result<&Note, StoreError> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id() == id)
            .ok_or(StoreError::NotFound { id })?;

        let at = timestamp_after(note.updated_at());
        note.apply_edit(title, content, category, at);
        debug!("event=note_update module=store status=ok id={id}");
        Ok(&*note)
    }

    /// Removes a note and returns it. Clears the active reference when it
    /// pointed at the removed note.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when `id` is not in the collection.
    pub fn delete(&mut self, id: NoteId) -> Result<Note, StoreError> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id() == id)
            .ok_or(StoreError::NotFound { id })?;

        let removed = self.notes.remove(index);
        if self.active == Some(id) {
            self.active = None;
        }
        info!("event=note_delete module=store status=ok id={id}");
        Ok(removed)
    }

    /// Points the active reference at an existing note.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when `id` is not in the collection.
    pub fn set_active(&mut self, id: NoteId) -> Result<(), StoreError> {
        if !self.contains(id) {
            return Err(StoreError::NotFound { id });
        }
        self.active = Some(id);
        Ok(())
    }

    /// Clears the active reference.
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    // ===========================================
    // Bulk operations
    // ===========================================

    /// Discards the collection and replaces it with `drafts`, each given a
    /// fresh id. The active reference is cleared.
    pub fn replace_all(&mut self, drafts: Vec<NoteDraft>) -> Vec<NoteId> {
        let discarded = self.notes.len();
        self.notes = self.materialize(drafts);
        self.active = None;
        info!(
            "event=notes_replace module=store status=ok discarded={} inserted={}",
            discarded,
            self.notes.len()
        );
        self.notes.iter().map(Note::id).collect()
    }

    /// Prepends `drafts` in their given order, each with a fresh id.
    pub fn merge_all(&mut self, drafts: Vec<NoteDraft>) -> Vec<NoteId> {
        let incoming = self.materialize(drafts);
        let ids: Vec<NoteId> = incoming.iter().map(Note::id).collect();
        self.notes.splice(0..0, incoming);
        info!(
            "event=notes_merge module=store status=ok inserted={} total={}",
            ids.len(),
            self.notes.len()
        );
        ids
    }

    /// Removes every note and clears the active reference. The id counter
    /// keeps counting so ids are not reused. Returns how many notes were
    /// removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.notes.len();
        self.notes.clear();
        self.active = None;
        info!("event=notes_clear module=store status=ok removed={removed}");
        removed
    }

    fn materialize(&mut self, drafts: Vec<NoteDraft>) -> Vec<Note> {
        drafts
            .into_iter()
            .map(|draft| {
                let id = self.allocate_id();
                Note::from_draft(id, draft)
            })
            .collect()
    }

    fn allocate_id(&mut self) -> NoteId {
        let id = self.next_id;
        self.next_id = id.successor();
        id
    }
}
