//! Export document for the whole collection.

use super::TransferError;
use crate::domain::Note;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Format version written to every export.
pub const EXPORT_VERSION: &str = "2.0";

/// Application name written to every export.
pub const APPLICATION_NAME: &str = "Jotter";

/// The serialized shape of an export.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub export_date: DateTime<Utc>,
    pub version: &'static str,
    pub total_notes: usize,
    pub application: &'static str,
    pub notes: &'a [Note],
}

impl<'a> ExportDocument<'a> {
    /// Wraps `notes` with export metadata stamped at `exported_at`.
    pub fn new(notes: &'a [Note], exported_at: DateTime<Utc>) -> Self {
        Self {
            export_date: exported_at,
            version: EXPORT_VERSION,
            total_notes: notes.len(),
            application: APPLICATION_NAME,
            notes,
        }
    }
}

/// Serializes `notes` into a pretty-printed export document.
pub fn export_json(notes: &[Note], exported_at: DateTime<Utc>) -> Result<String, TransferError> {
    let document = ExportDocument::new(notes, exported_at);
    let json = serde_json::to_string_pretty(&document).map_err(TransferError::Serialize)?;
    log::info!(
        "event=notes_export module=transfer status=ok notes={}",
        document.total_notes
    );
    Ok(json)
}

/// Suggested file name for an export made on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("jotter-notes-{}.json", date.format("%Y-%m-%d"))
}
