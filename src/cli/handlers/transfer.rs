//! Export and import command handlers.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

use super::open_store;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::{ExportArgs, ImportArgs};
use crate::domain::now_timestamp;
use crate::transfer::{ImportMode, export_filename, export_json, import};

pub fn handle_export(args: &ExportArgs, store_path: &Path) -> Result<()> {
    let store = open_store(store_path)?;
    let json = export_json(store.list(), now_timestamp())?;

    match &args.output {
        None => println!("{json}"),
        Some(output) => {
            let path = export_target(output, Local::now().date_naive());
            std::fs::write(&path, format!("{json}\n"))
                .with_context(|| format!("failed to write export to {}", path.display()))?;
            println!("Exported {} notes to {}", store.len(), path.display());
        }
    }
    Ok(())
}

/// Resolves `-o`: a directory gets the dated default file name.
pub(crate) fn export_target(output: &Path, date: NaiveDate) -> PathBuf {
    if output.is_dir() {
        output.join(export_filename(date))
    } else {
        output.to_path_buf()
    }
}

pub fn handle_import(args: &ImportArgs, store_path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let mut store = open_store(store_path)?;
    let mode = if args.replace {
        ImportMode::Replace
    } else {
        ImportMode::Merge
    };

    let summary = import(&mut store, &json, mode)
        .with_context(|| format!("failed to import {}", args.file.display()))?;
    store.persist()?;

    match args.format {
        OutputFormat::Human => {
            let verb = match mode {
                ImportMode::Merge => "Merged",
                ImportMode::Replace => "Replaced collection with",
            };
            println!("{} {} notes ({} total)", verb, summary.imported, summary.total);
            if summary.skipped > 0 {
                println!("Skipped {} entries without a title", summary.skipped);
            }
        }
        OutputFormat::Json => println!("{}", Output::new(&summary).to_json()?),
    }
    Ok(())
}
