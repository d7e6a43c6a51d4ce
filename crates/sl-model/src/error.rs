//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur when committing to an entity store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store refused the batch. Nothing was persisted.
    #[error("batch commit rejected: {0}")]
    Rejected(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
