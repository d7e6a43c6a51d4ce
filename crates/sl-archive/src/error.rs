//! Error types for archive parsing and decompression.

use crate::cursor::TruncatedData;
use thiserror::Error;

/// Archive-structural errors. These abort the whole parse before any entry
/// is handed to the caller.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Buffer too small to hold even an End-Of-Central-Directory record.
    #[error("buffer too small for a ZIP archive ({len} bytes)")]
    TooSmall { len: usize },

    /// No End-Of-Central-Directory signature within the trailing search
    /// window.
    #[error("no end-of-central-directory record found")]
    NoEocd,

    /// A Central Directory record is inconsistent: bad signature, or declared
    /// lengths running past the buffer end.
    #[error("corrupt central directory: {0}")]
    CorruptCentralDirectory(String),
}

/// Raw-DEFLATE decoding errors. Entry-scoped: the affected entry is listed
/// without payload, the archive parse itself continues.
#[derive(Error, Debug)]
pub enum DecompressError {
    /// The compressed stream is not valid DEFLATE data.
    #[error("invalid deflate stream: {0}")]
    Corrupt(#[from] flate2::DecompressError),

    /// The stream ended before a final block, or input ran out.
    #[error("deflate stream did not terminate")]
    Incomplete,

    /// The stream decoded, but not to the declared uncompressed size.
    #[error("decoded size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

impl From<TruncatedData> for ArchiveError {
    fn from(err: TruncatedData) -> Self {
        ArchiveError::CorruptCentralDirectory(err.to_string())
    }
}

/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;
