//! Hand-written reader for the ZIP subset used by trip archives.
//!
//! The companion web app exports a trip as a ZIP archive holding `data.json`
//! plus image files. This crate parses that archive entirely in memory:
//! locate the End-Of-Central-Directory record, walk the Central Directory,
//! resolve each entry's Local File Header and decode the payload (method 0
//! "stored" or method 8 raw DEFLATE).
//!
//! Every multi-byte read goes through the bounds-checked [`cursor`] module;
//! malformed input fails with a typed error, never with a panic or an
//! out-of-range access.
//!
//! # Example
//!
//! ```no_run
//! use sl_archive::{parse, EntryKind};
//!
//! let bytes = std::fs::read("trip.zip").unwrap();
//! for entry in parse(&bytes).unwrap() {
//!     if entry.kind == EntryKind::File {
//!         println!("{}: {} bytes", entry.path, entry.payload.map_or(0, |p| p.len()));
//!     }
//! }
//! ```

pub mod cursor;
pub mod error;
pub mod inflate;
pub mod reader;

#[cfg(any(test, feature = "test-utils"))]
pub mod testutil;

pub use cursor::TruncatedData;
pub use error::{ArchiveError, DecompressError, Result};
pub use inflate::inflate_raw;
pub use reader::{parse, parse_with_mode, ArchiveEntry, EntryKind, ParseMode};
