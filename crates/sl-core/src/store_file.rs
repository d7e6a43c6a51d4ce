//! JSON store file used by the CLI.
//!
//! The store is a pretty-printed array of cruises; photo bytes travel as
//! base64. A missing file reads as an empty store. Writes go through a
//! sibling temp file and a rename, so a crash mid-write never clobbers the
//! previous store.

use crate::error::Result;
use sl_model::{EntityStore, InMemoryStore};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Load a store file; a missing file yields an empty store.
pub fn load(path: &Path) -> Result<InMemoryStore> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let cruises = serde_json::from_slice(&bytes)?;
            let store = InMemoryStore::with_cruises(cruises);
            debug!(path = %path.display(), cruises = store.len(), "store loaded");
            Ok(store)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no store file, starting empty");
            Ok(InMemoryStore::new())
        }
        Err(err) => Err(err.into()),
    }
}

/// Write the store back, atomically replacing the previous file.
pub fn save(path: &Path, store: &InMemoryStore) -> Result<()> {
    let json = serde_json::to_vec_pretty(store.cruises())?;

    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, &json)?;
    std::fs::rename(&tmp, path)?;

    info!(path = %path.display(), cruises = store.len(), "store saved");
    Ok(())
}
