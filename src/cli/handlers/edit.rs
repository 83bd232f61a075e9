//! Edit command handler.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::time::Instant;

use super::{open_store, start_editor};
use crate::cli::EditArgs;
use crate::cli::config::Config;
use crate::cli::output::{NoteDetail, Output, OutputFormat};

pub fn handle_edit(args: &EditArgs, store_path: &Path, config: &Config) -> Result<()> {
    if args.title.is_none()
        && args.content.is_none()
        && args.append.is_none()
        && args.category.is_none()
    {
        bail!("nothing to change: pass --title, --content, --append or --category");
    }

    let mut store = open_store(store_path)?;
    let mut editor = start_editor(&store, config);
    editor.select(&mut store, args.id)?;

    let now = Instant::now();
    if let Some(title) = &args.title {
        editor.set_title(title.as_str(), now)?;
    }
    if let Some(content) = &args.content {
        editor.set_content(content.as_str(), now)?;
    }
    if let Some(extra) = &args.append {
        let content = append_line(&editor.buffer().content, extra);
        editor.set_content(content, now)?;
    }
    if let Some(category) = &args.category {
        editor.set_category(category.as_str(), now)?;
    }

    editor
        .save(&mut store)
        .with_context(|| format!("failed to save note {}", args.id))?;

    let note = store
        .get(args.id)
        .with_context(|| format!("note {} vanished after saving", args.id))?;

    match args.format {
        OutputFormat::Human => println!("Updated: {} [#{}]", note.title(), note.id()),
        OutputFormat::Json => {
            println!("{}", Output::new(NoteDetail::from_note(note)).to_json()?);
        }
    }
    Ok(())
}

/// Appends `extra` to `content` on its own line.
pub(crate) fn append_line(content: &str, extra: &str) -> String {
    if content.is_empty() {
        extra.to_string()
    } else if content.ends_with('\n') {
        format!("{content}{extra}")
    } else {
        format!("{content}\n{extra}")
    }
}
