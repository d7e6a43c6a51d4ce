//! Transcoder between the entity graph and the JSON interchange format.
//!
//! The interchange format is the transport schema shared with the companion
//! web app: string-typed, camelCase, one JSON array of cruises. Identifiers
//! are minted fresh on every export, so no stable identity survives a round
//! trip; duplicate detection on import relies on the title/start-day/ship
//! heuristic instead.
//!
//! Export is total. Import recovers record-level problems locally (bad
//! dates, unresolvable images, unknown category tokens) and only fails for
//! structural JSON errors.

pub mod dates;
pub mod error;
pub mod export;
pub mod import;
pub mod schema;

pub use error::{InterchangeError, Result};
pub use export::{export_json, to_interchange};
pub use import::{decode_batch, ImportBatch};
pub use schema::{ExportCruise, ExportExpense, ExportPort};
