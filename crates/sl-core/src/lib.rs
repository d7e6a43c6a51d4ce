//! Export/import orchestrator for shiplog.
//!
//! Ties the pieces together: the archive reader digs `data.json` and image
//! files out of a web-app ZIP export, the interchange transcoder maps
//! records both ways, and this crate owns discovery, temp-directory
//! lifetime, duplicate reconciliation and the single atomic batch commit.
//!
//! # Operations
//!
//! - [`exporter::export`]: entity snapshot to interchange JSON bytes.
//! - [`importer::import_archive`]: ZIP archive bytes into an [`EntityStore`].
//! - [`importer::import_json`]: bare interchange JSON into an [`EntityStore`].
//!
//! All operations are synchronous; callers wanting a responsive surface run
//! them on a background task. Nothing is persisted until the final commit,
//! so cancellation before that point leaves the store untouched.
//!
//! [`EntityStore`]: sl_model::EntityStore

pub mod error;
pub mod exporter;
pub mod importer;
pub mod logging;
pub mod store_file;

pub use error::{Result, TransferError};
pub use exporter::{export, export_to_file};
pub use importer::{import_archive, import_json, ImportResult};
