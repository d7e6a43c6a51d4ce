//! Export orchestration.

use crate::error::Result;
use sl_model::CruiseRecord;
use std::path::Path;
use tracing::info;

/// Serialize a snapshot of the entity graph to interchange JSON bytes.
pub fn export(cruises: &[CruiseRecord]) -> Result<Vec<u8>> {
    let bytes = sl_interchange::export_json(cruises)?;
    info!(cruises = cruises.len(), bytes = bytes.len(), "export complete");
    Ok(bytes)
}

/// Export straight to a file.
pub fn export_to_file(cruises: &[CruiseRecord], path: &Path) -> Result<()> {
    let bytes = export(cruises)?;
    std::fs::write(path, bytes)?;
    info!(path = %path.display(), "export written");
    Ok(())
}
