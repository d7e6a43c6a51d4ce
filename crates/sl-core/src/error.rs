//! Error types for export/import orchestration.

use thiserror::Error;

/// Errors that can abort an export or import operation.
#[derive(Error, Debug)]
pub enum TransferError {
    /// No `data.json` at the extraction root or one directory below it.
    /// Raised before any record parsing.
    #[error("no data.json found in the archive")]
    MissingDataFile,

    /// Archive-structural failure; nothing was extracted.
    #[error("archive error: {0}")]
    Archive(#[from] sl_archive::ArchiveError),

    /// Interchange-structural failure; no records were processed.
    #[error("interchange error: {0}")]
    Interchange(#[from] sl_interchange::InterchangeError),

    /// The store rejected the batch commit; the store is unchanged.
    #[error("store error: {0}")]
    Store(#[from] sl_model::StoreError),

    /// JSON error outside the interchange payload (store file, summaries).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for orchestrator operations.
pub type Result<T> = std::result::Result<T, TransferError>;
