//! Error types for interchange transcoding.

use thiserror::Error;

/// Errors that abort an interchange operation.
///
/// Record-level problems never surface here; they are recovered in place and
/// reflected in the import summary instead.
#[derive(Error, Debug)]
pub enum InterchangeError {
    /// The top-level JSON is not an array of the expected shape.
    #[error("interchange decode failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for interchange operations.
pub type Result<T> = std::result::Result<T, InterchangeError>;
