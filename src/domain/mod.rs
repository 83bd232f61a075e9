//! Core types: Note, NoteDraft, NoteId

mod note;
mod note_id;

pub use note::{
    DEFAULT_CATEGORY, DEFAULT_TITLE, Note, NoteDraft, normalize_category, normalize_title,
    now_timestamp, timestamp_after,
};
pub use note_id::{NoteId, ParseNoteIdError};
