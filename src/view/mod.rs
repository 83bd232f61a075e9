//! Read-only list projection: filtering, previews, counts
mod list_view;

pub use list_view::{
    EmptyState, ListFilter, NoteCard, NoteListView, PREVIEW_CHARS, preview, relative_date,
};
