//! Edit buffer, debounced auto-save, markup insertion and shortcuts

mod buffer;
mod controller;
mod deferred;
mod markup;
mod shortcuts;

pub use buffer::{EditBuffer, TextStats};
pub use controller::{
    DEFAULT_AUTOSAVE_DELAY, DEFAULT_SAFETY_NET_INTERVAL, EditorConfig, EditorError, FlushOutcome,
    NoteEditorController, SaveStatus,
};
pub use deferred::{Deferred, Interval};
pub use markup::{Markup, MarkupError, TextEdit, insert_date, insert_list, wrap_selection};
pub use shortcuts::{Action, Focus, KeyChord, ParseChordError};
