//! Entity graph for shiplog.
//!
//! A [`CruiseRecord`] is the aggregate root: it owns its route, expenses and
//! photos by value, so dropping a cruise drops all of its children atomically.
//! Children never outlive their parent and carry no back-references.
//!
//! The [`EntityStore`] trait is the seam between the export/import core and
//! whatever persistence the caller brings: a read-only snapshot for export and
//! duplicate detection, and a single all-or-nothing batch commit for import.

pub mod cruise;
pub mod error;
pub mod expense;
pub mod photo;
pub mod port;
pub mod store;

mod b64;

pub use cruise::CruiseRecord;
pub use error::{Result, StoreError};
pub use expense::{ExpenseCategory, ExpenseRecord};
pub use photo::PhotoBlob;
pub use port::PortRecord;
pub use store::{EntityStore, InMemoryStore};
