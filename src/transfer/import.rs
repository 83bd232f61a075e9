//! Import parsing and application.

use super::TransferError;
use crate::domain::{DEFAULT_CATEGORY, NoteDraft, NoteId, now_timestamp};
use crate::store::{NoteStorage, NoteStore};
use chrono::{DateTime, SubsecRound, Utc};
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

/// How imported notes combine with the existing collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Prepend imported notes to the collection.
    #[default]
    Merge,
    /// Discard the collection and keep only the imported notes.
    Replace,
}

/// What an import did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub mode: ImportMode,
    pub imported: usize,
    pub skipped: usize,
    pub total: usize,
    pub ids: Vec<NoteId>,
}

/// Parses an import document into drafts.
///
/// Entries without a string `title` are skipped. Missing or non-string
/// `content` becomes empty, missing `category` becomes the default, and
/// missing or unparseable timestamps become the current time.
///
/// # Errors
///
/// - `InvalidImportDocument` when the text is not JSON or `notes` is
///   missing or not an array
/// - `NoValidEntries` when no entry has a string title
pub fn parse_import(json: &str) -> Result<(Vec<NoteDraft>, usize), TransferError> {
    let document: Value = serde_json::from_str(json).map_err(|err| invalid(err.to_string()))?;

    let entries = match document.get("notes") {
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(invalid("`notes` is not an array")),
        None => return Err(invalid("missing `notes` field")),
    };

    let now = now_timestamp();
    let drafts: Vec<NoteDraft> = entries
        .iter()
        .filter_map(|entry| draft_from_entry(entry, now))
        .collect();
    let skipped = entries.len() - drafts.len();

    if drafts.is_empty() {
        return Err(TransferError::NoValidEntries);
    }
    if skipped > 0 {
        debug!("event=import_parse module=transfer status=ok skipped={skipped}");
    }
    Ok((drafts, skipped))
}

/// Parses `json` and applies it to `store` in memory.
///
/// The store is left untouched when parsing fails. Persisting the result
/// is the caller's job.
pub fn import<S: NoteStorage>(
    store: &mut NoteStore<S>,
    json: &str,
    mode: ImportMode,
) -> Result<ImportSummary, TransferError> {
    let (drafts, skipped) = parse_import(json)?;
    let ids = match mode {
        ImportMode::Merge => store.merge_all(drafts),
        ImportMode::Replace => store.replace_all(drafts),
    };

    info!(
        "event=notes_import module=transfer status=ok mode={:?} imported={} skipped={}",
        mode,
        ids.len(),
        skipped
    );
    Ok(ImportSummary {
        mode,
        imported: ids.len(),
        skipped,
        total: store.len(),
        ids,
    })
}

fn draft_from_entry(entry: &Value, now: DateTime<Utc>) -> Option<NoteDraft> {
    let title = entry.get("title")?.as_str()?;

    let text = |key: &str| entry.get(key).and_then(Value::as_str);
    let created_at = text("createdAt").and_then(parse_timestamp).unwrap_or(now);
    let updated_at = text("updatedAt").and_then(parse_timestamp).unwrap_or(now);

    Some(
        NoteDraft::new(title)
            .content(text("content").unwrap_or_default())
            .category(text("category").unwrap_or(DEFAULT_CATEGORY))
            .timestamps(created_at, updated_at),
    )
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|at| at.with_timezone(&Utc).trunc_subsecs(3))
}

fn invalid(reason: impl Into<String>) -> TransferError {
    TransferError::InvalidImportDocument {
        reason: reason.into(),
    }
}
