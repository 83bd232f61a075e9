//! Bridges the edit buffer to the store with debounced auto-save.
//!
//! # Timers
//! - Debounce: every edit (re)schedules a single pending flush at
//!   `now + autosave_delay`. Only a quiet period that long lets it fire.
//! - Safety net: an independent fixed-period tick that flushes if the
//!   buffer is still dirty, so an endless typing streak still gets saved.
//!
//! Both timers go through the same flush, which re-checks the dirty flag
//! first. When both are due in one [`poll`](NoteEditorController::poll)
//! the note is written once.
//!
//! # Switching
//! Selecting another note or creating one while dirty flushes first. If
//! that flush fails the switch does not happen and the error is returned.

use super::buffer::{EditBuffer, TextStats};
use super::deferred::{Deferred, Interval};
use super::markup::{self, Markup, MarkupError, TextEdit};
use crate::domain::{Note, NoteId};
use crate::store::{NoteStorage, NoteStore, StorageError, StoreError};
use chrono::NaiveDate;
use log::{Level, debug, info, log, warn};
use std::fmt;
use std::ops::Range;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Quiet period after the last edit before the buffer is saved.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

/// Period of the safety-net flush.
pub const DEFAULT_SAFETY_NET_INTERVAL: Duration = Duration::from_secs(30);

/// Timer settings for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    pub autosave_delay: Duration,
    pub safety_net_interval: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
            safety_net_interval: DEFAULT_SAFETY_NET_INTERVAL,
        }
    }
}

/// Errors surfaced by editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The bound or requested note is gone from the store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An edit or save was attempted with no note bound to the buffer.
    #[error("no note selected")]
    NoActiveNote,

    /// The store changed in memory but could not be written.
    #[error("save failed: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Markup(#[from] MarkupError),
}

impl EditorError {
    /// True for the "note no longer exists" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EditorError::Store(StoreError::NotFound { .. }))
    }
}

/// The save-status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    AllSaved,
    Unsaved,
    Saved,
    Failed(String),
    NoNoteSelected,
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStatus::AllSaved => write!(f, "All changes saved"),
            SaveStatus::Unsaved => write!(f, "Unsaved changes..."),
            SaveStatus::Saved => write!(f, "Saved"),
            SaveStatus::Failed(reason) => write!(f, "Save failed: {reason}"),
            SaveStatus::NoNoteSelected => write!(f, "No note selected"),
        }
    }
}

/// What a flush did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// The buffer was written to the store and persisted.
    Saved,
    /// Nothing was dirty; the store was not touched.
    Clean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Debounce,
    SafetyNet,
    Explicit,
    Switch,
    Teardown,
}

impl Trigger {
    fn as_str(self) -> &'static str {
        match self {
            Trigger::Debounce => "debounce",
            Trigger::SafetyNet => "safety_net",
            Trigger::Explicit => "explicit",
            Trigger::Switch => "switch",
            Trigger::Teardown => "teardown",
        }
    }
}

/// Holds the edit buffer for the active note and decides when it is saved.
///
/// The controller never owns the store; every operation that touches notes
/// takes it by reference.
#[derive(Debug)]
pub struct NoteEditorController {
    config: EditorConfig,
    buffer: EditBuffer,
    bound: Option<NoteId>,
    has_unsaved_changes: bool,
    debounce: Deferred,
    safety_net: Interval,
    status: SaveStatus,
    flushes: usize,
}

impl NoteEditorController {
    /// Creates an idle controller. The safety net's first tick is one
    /// interval after `now`.
    pub fn new(config: EditorConfig, now: Instant) -> Self {
        Self {
            config,
            buffer: EditBuffer::default(),
            bound: None,
            has_unsaved_changes: false,
            debounce: Deferred::new(),
            safety_net: Interval::new(config.safety_net_interval, now),
            status: SaveStatus::AllSaved,
            flushes: 0,
        }
    }

    /// Binds the buffer to the store's active note, if it has one.
    pub fn attach<S: NoteStorage>(&mut self, store: &NoteStore<S>) {
        match store.active() {
            Some(note) => self.bind(note),
            None => self.unbind(),
        }
    }

    // ===========================================
    // State
    // ===========================================

    /// Returns the timer settings.
    pub fn config(&self) -> EditorConfig {
        self.config
    }

    /// Returns the edit buffer.
    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Returns the id of the note the buffer is bound to.
    pub fn bound_id(&self) -> Option<NoteId> {
        self.bound
    }

    /// True when the buffer holds edits not yet saved to the store.
    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    /// Returns the save-status indicator.
    pub fn status(&self) -> &SaveStatus {
        &self.status
    }

    /// Returns when the pending debounced save will fire.
    pub fn pending_autosave(&self) -> Option<Instant> {
        self.debounce.due()
    }

    /// Returns when the safety net next checks the buffer.
    pub fn next_safety_net_tick(&self) -> Instant {
        self.safety_net.next_tick()
    }

    /// Number of flushes that wrote to the store.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    /// Word, character and line counts of the buffer content.
    pub fn stats(&self) -> TextStats {
        self.buffer.stats()
    }

    // ===========================================
    // Buffer edits
    // ===========================================

    /// Replaces the title field.
    pub fn set_title(&mut self, title: impl Into<String>, now: Instant) -> Result<(), EditorError> {
        let title = title.into();
        self.edit(now, |buffer| buffer.title = title)
    }

    /// Replaces the content field.
    pub fn set_content(
        &mut self,
        content: impl Into<String>,
        now: Instant,
    ) -> Result<(), EditorError> {
        let content = content.into();
        self.edit(now, |buffer| buffer.content = content)
    }

    /// Replaces the category field.
    pub fn set_category(
        &mut self,
        category: impl Into<String>,
        now: Instant,
    ) -> Result<(), EditorError> {
        let category = category.into();
        self.edit(now, |buffer| buffer.category = category)
    }

    /// Wraps a character range of the content in markup and returns the
    /// range to select afterwards.
    pub fn format(
        &mut self,
        markup: Markup,
        selection: Range<usize>,
        now: Instant,
    ) -> Result<Range<usize>, EditorError> {
        self.ensure_bound()?;
        let edit = markup::wrap_selection(&self.buffer.content, selection, markup)?;
        self.apply_text_edit(edit, now)
    }

    /// Inserts a bullet-list template at a character position.
    pub fn insert_list(&mut self, cursor: usize, now: Instant) -> Result<Range<usize>, EditorError> {
        self.ensure_bound()?;
        let edit = markup::insert_list(&self.buffer.content, cursor)?;
        self.apply_text_edit(edit, now)
    }

    /// Inserts a date line at a character position.
    pub fn insert_date(
        &mut self,
        cursor: usize,
        date: NaiveDate,
        now: Instant,
    ) -> Result<Range<usize>, EditorError> {
        self.ensure_bound()?;
        let edit = markup::insert_date(&self.buffer.content, cursor, date)?;
        self.apply_text_edit(edit, now)
    }

    // ===========================================
    // Saving
    // ===========================================

    /// Runs whichever timers are due at `now`.
    ///
    /// Returns `None` when no timer was due, otherwise what the flush did.
    pub fn poll<S: NoteStorage>(
        &mut self,
        store: &mut NoteStore<S>,
        now: Instant,
    ) -> Result<Option<FlushOutcome>, EditorError> {
        let debounce_due = self.debounce.fire(now);
        let tick_due = self.safety_net.tick(now);

        let trigger = match (debounce_due, tick_due) {
            (true, _) => Trigger::Debounce,
            (false, true) => Trigger::SafetyNet,
            (false, false) => return Ok(None),
        };

        self.flush(store, trigger, false).map(Some)
    }

    /// Saves the buffer now, dirty or not, cancelling any pending
    /// debounced save.
    pub fn save<S: NoteStorage>(
        &mut self,
        store: &mut NoteStore<S>,
    ) -> Result<FlushOutcome, EditorError> {
        self.flush(store, Trigger::Explicit, true)
    }

    /// Drops unsaved edits and reloads the buffer from the store. Unbinds
    /// when the bound note no longer exists.
    pub fn discard<S: NoteStorage>(&mut self, store: &NoteStore<S>) {
        match self.bound.and_then(|id| store.get(id)) {
            Some(note) => self.bind(note),
            None => self.unbind(),
        }
        debug!("event=buffer_discard module=editor status=ok");
    }

    /// Unbinds the buffer without saving. Used after the collection was
    /// replaced or cleared.
    pub fn detach(&mut self) {
        self.unbind();
    }

    // ===========================================
    // Switching
    // ===========================================

    /// Creates a note and binds the buffer to it.
    ///
    /// # Errors
    ///
    /// Fails without creating anything when the buffer is dirty and cannot
    /// be flushed.
    pub fn new_note<S: NoteStorage>(
        &mut self,
        store: &mut NoteStore<S>,
    ) -> Result<NoteId, EditorError> {
        self.flush_before_switch(store)?;

        let note = store.create();
        let id = note.id();
        self.bind(note);
        self.persist_quietly(store);
        Ok(id)
    }

    /// Makes `id` the active note and loads it into the buffer.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `id` is not in the store. When the buffer is
    /// dirty and its flush fails, that error is returned and the previous
    /// note stays bound.
    pub fn select<S: NoteStorage>(
        &mut self,
        store: &mut NoteStore<S>,
        id: NoteId,
    ) -> Result<(), EditorError> {
        if !store.contains(id) {
            return Err(StoreError::NotFound { id }.into());
        }
        if self.bound == Some(id) {
            store.set_active(id)?;
            return Ok(());
        }

        self.flush_before_switch(store)?;

        store.set_active(id)?;
        if let Some(note) = store.get(id) {
            self.bind(note);
        }
        Ok(())
    }

    /// Deletes a note. When it is the bound note the buffer is cleared and
    /// its pending save dropped.
    pub fn delete<S: NoteStorage>(
        &mut self,
        store: &mut NoteStore<S>,
        id: NoteId,
    ) -> Result<Note, EditorError> {
        let removed = store.delete(id)?;
        if self.bound == Some(id) {
            self.unbind();
        }
        self.persist_quietly(store);
        Ok(removed)
    }

    /// Ends the session: a best-effort flush of pending edits, then the
    /// store's own teardown.
    pub fn teardown<S: NoteStorage>(
        mut self,
        mut store: NoteStore<S>,
    ) -> Result<S, StorageError> {
        if let Err(err) = self.flush(&mut store, Trigger::Teardown, false) {
            warn!("event=editor_teardown module=editor status=error error={err}");
        }
        store.teardown()
    }

    // ===========================================
    // Internals
    // ===========================================

    /// A failure repeating on an already failed buffer drops to debug.
    fn failure_level(&self) -> Level {
        match self.status {
            SaveStatus::Failed(_) => Level::Debug,
            _ => Level::Warn,
        }
    }

    fn bind(&mut self, note: &Note) {
        self.buffer = EditBuffer::from_note(note);
        self.bound = Some(note.id());
        self.has_unsaved_changes = false;
        self.debounce.cancel();
        self.status = SaveStatus::AllSaved;
    }

    fn unbind(&mut self) {
        self.buffer = EditBuffer::default();
        self.bound = None;
        self.has_unsaved_changes = false;
        self.debounce.cancel();
        self.status = SaveStatus::AllSaved;
    }

    fn ensure_bound(&mut self) -> Result<NoteId, EditorError> {
        match self.bound {
            Some(id) => Ok(id),
            None => {
                self.status = SaveStatus::NoNoteSelected;
                Err(EditorError::NoActiveNote)
            }
        }
    }

    fn edit(&mut self, now: Instant, apply: impl FnOnce(&mut EditBuffer)) -> Result<(), EditorError> {
        self.ensure_bound()?;
        apply(&mut self.buffer);
        self.mark_dirty(now);
        Ok(())
    }

    fn apply_text_edit(&mut self, edit: TextEdit, now: Instant) -> Result<Range<usize>, EditorError> {
        self.buffer.content = edit.text;
        self.mark_dirty(now);
        Ok(edit.selection)
    }

    fn mark_dirty(&mut self, now: Instant) {
        self.has_unsaved_changes = true;
        self.status = SaveStatus::Unsaved;
        self.debounce.schedule(now + self.config.autosave_delay);
    }

    fn flush_before_switch<S: NoteStorage>(
        &mut self,
        store: &mut NoteStore<S>,
    ) -> Result<(), EditorError> {
        if self.has_unsaved_changes {
            self.flush(store, Trigger::Switch, false)?;
        }
        Ok(())
    }

    fn flush<S: NoteStorage>(
        &mut self,
        store: &mut NoteStore<S>,
        trigger: Trigger,
        force: bool,
    ) -> Result<FlushOutcome, EditorError> {
        if !force && !self.has_unsaved_changes {
            debug!(
                "event=note_flush module=editor status=skipped trigger={}",
                trigger.as_str()
            );
            return Ok(FlushOutcome::Clean);
        }

        let id = self.ensure_bound()?;

        if let Err(err) = store.update(
            id,
            &self.buffer.title,
            &self.buffer.content,
            &self.buffer.category,
        ) {
            log!(
                self.failure_level(),
                "event=note_flush module=editor status=error trigger={} id={} error={}",
                trigger.as_str(),
                id,
                err
            );
            self.status = SaveStatus::Failed(err.to_string());
            return Err(err.into());
        }

        if let Err(err) = store.persist() {
            self.status = SaveStatus::Failed(err.to_string());
            return Err(err.into());
        }

        self.has_unsaved_changes = false;
        self.debounce.cancel();
        self.status = SaveStatus::Saved;
        self.flushes += 1;
        info!(
            "event=note_flush module=editor status=ok trigger={} id={}",
            trigger.as_str(),
            id
        );
        Ok(FlushOutcome::Saved)
    }

    fn persist_quietly<S: NoteStorage>(&mut self, store: &mut NoteStore<S>) {
        if let Err(err) = store.persist() {
            self.status = SaveStatus::Failed(err.to_string());
        }
    }
}
