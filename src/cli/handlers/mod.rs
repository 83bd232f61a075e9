//! Command handlers for the CLI.

mod clear;
mod edit;
mod list;
mod new;
mod rm;
mod shell;
mod show;
mod transfer;

#[cfg(test)]
pub(crate) mod tests;

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;

use super::config::Config;
use crate::editor::NoteEditorController;
use crate::store::{JsonFileStorage, NoteStore};

// Re-export public items
pub use clear::handle_clear;
pub use edit::handle_edit;
pub use list::{handle_categories, handle_list};
pub use new::handle_new;
pub use rm::handle_rm;
pub use shell::{Flow, Session, handle_shell, run_shell};
pub use show::handle_show;
pub use transfer::{handle_export, handle_import};

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the JSON store at `path`.
pub(crate) fn open_store(path: &Path) -> Result<NoteStore<JsonFileStorage>> {
    NoteStore::init(JsonFileStorage::new(path))
        .with_context(|| format!("failed to open store at {}", path.display()))
}

/// Creates an editor bound to the store's active note.
pub(crate) fn start_editor(
    store: &NoteStore<JsonFileStorage>,
    config: &Config,
) -> NoteEditorController {
    let mut editor = NoteEditorController::new(config.editor_config(), Instant::now());
    editor.attach(store);
    editor
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let truncated: String = s.chars().take(max_width - 3).collect();
        format!("{}...", truncated)
    }
}
