//! Entity store abstraction.
//!
//! The core never owns persistence. Export reads a snapshot; import stages a
//! batch in memory and hands it over in a single [`EntityStore::commit_batch`]
//! call. A failing commit must leave the store exactly as it was.

use crate::{CruiseRecord, Result};

/// Snapshot + mutation-sink capability the export/import core is given.
pub trait EntityStore {
    /// Read-only view of all cruises, used for export and duplicate detection.
    fn cruises(&self) -> &[CruiseRecord];

    /// Insert a batch of cruises, all-or-nothing.
    fn commit_batch(&mut self, batch: Vec<CruiseRecord>) -> Result<()>;
}

/// Simple in-memory store backing tests and the CLI.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    cruises: Vec<CruiseRecord>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing cruises.
    pub fn with_cruises(cruises: Vec<CruiseRecord>) -> Self {
        Self { cruises }
    }

    /// Number of cruises held.
    pub fn len(&self) -> usize {
        self.cruises.len()
    }

    /// Whether the store holds no cruises.
    pub fn is_empty(&self) -> bool {
        self.cruises.is_empty()
    }

    /// Consume the store, yielding its cruises.
    pub fn into_cruises(self) -> Vec<CruiseRecord> {
        self.cruises
    }
}

impl EntityStore for InMemoryStore {
    fn cruises(&self) -> &[CruiseRecord] {
        &self.cruises
    }

    fn commit_batch(&mut self, batch: Vec<CruiseRecord>) -> Result<()> {
        self.cruises.extend(batch);
        Ok(())
    }
}
