//! Show command handler.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use super::open_store;
use crate::cli::ShowArgs;
use crate::cli::output::{NoteDetail, Output, OutputFormat};
use crate::domain::Note;
use crate::editor::TextStats;

pub fn handle_show(args: &ShowArgs, store_path: &Path) -> Result<()> {
    let store = open_store(store_path)?;
    let note = store
        .get(args.id)
        .with_context(|| format!("note not found: {}", args.id))?;

    match args.format {
        OutputFormat::Human => write_note(&mut std::io::stdout().lock(), note)?,
        OutputFormat::Json => println!("{}", Output::new(NoteDetail::from_note(note)).to_json()?),
    }
    Ok(())
}

/// Writes a note with a header block, its body and text stats.
pub(crate) fn write_note(out: &mut impl Write, note: &Note) -> std::io::Result<()> {
    writeln!(out, "# {} [#{}]", note.title(), note.id())?;
    writeln!(out, "Category: {}", note.category())?;
    writeln!(
        out,
        "Created:  {}",
        note.created_at().format("%Y-%m-%d %H:%M")
    )?;
    writeln!(
        out,
        "Updated:  {}",
        note.updated_at().format("%Y-%m-%d %H:%M")
    )?;
    writeln!(out)?;
    if !note.content().is_empty() {
        writeln!(out, "{}", note.content())?;
        writeln!(out)?;
    }
    writeln!(out, "{}", TextStats::of(note.content()))?;
    Ok(())
}
