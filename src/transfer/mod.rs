//! JSON export and import of the whole collection
mod export;
mod import;

use thiserror::Error;

pub use export::{APPLICATION_NAME, EXPORT_VERSION, ExportDocument, export_filename, export_json};
pub use import::{ImportMode, ImportSummary, import, parse_import};

/// Errors raised while exporting or importing.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("invalid import document: {reason}")]
    InvalidImportDocument { reason: String },

    #[error("import document contains no notes with a title")]
    NoValidEntries,

    #[error("failed to serialize export: {0}")]
    Serialize(#[source] serde_json::Error),
}
