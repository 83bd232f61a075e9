//! New note command handler.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;

use super::{open_store, start_editor};
use crate::cli::NewArgs;
use crate::cli::config::Config;
use crate::cli::output::{NoteDetail, Output, OutputFormat};

pub fn handle_new(args: &NewArgs, store_path: &Path, config: &Config) -> Result<()> {
    let mut store = open_store(store_path)?;
    let mut editor = start_editor(&store, config);

    let id = editor
        .new_note(&mut store)
        .with_context(|| "failed to create note")?;

    let now = Instant::now();
    if let Some(title) = &args.title {
        editor.set_title(title.as_str(), now)?;
    }
    if let Some(content) = &args.content {
        editor.set_content(content.as_str(), now)?;
    }
    if let Some(category) = &args.category {
        editor.set_category(category.as_str(), now)?;
    }
    editor
        .save(&mut store)
        .with_context(|| format!("failed to save note {id}"))?;

    let note = store
        .get(id)
        .with_context(|| format!("note {id} vanished after saving"))?;

    match args.format {
        OutputFormat::Human => {
            println!("Created: {} [#{}]", note.title(), note.id());
            println!("  category: {}", note.category());
        }
        OutputFormat::Json => {
            println!("{}", Output::new(NoteDetail::from_note(note)).to_json()?);
        }
    }
    Ok(())
}
