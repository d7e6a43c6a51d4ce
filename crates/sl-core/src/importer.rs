//! Import orchestration: extraction, discovery, dedup, atomic commit.

use crate::error::{Result, TransferError};
use serde::Serialize;
use sl_archive::{ArchiveEntry, EntryKind};
use sl_model::EntityStore;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// Name of the interchange file inside an archive.
pub const DATA_FILE_NAME: &str = "data.json";

/// Aggregate outcome of one import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportResult {
    /// Cruises committed to the store.
    pub imported: usize,
    /// Candidates dropped as duplicates of existing cruises.
    pub skipped: usize,
}

/// Import a ZIP archive produced by the companion web app.
///
/// Entries are extracted into a temp directory that is removed on every exit
/// path. `data.json` must sit at the extraction root or inside exactly one
/// first-level subdirectory; image references resolve relative to whichever
/// directory held it. All surviving records are committed in one batch; a
/// failing commit leaves the store untouched.
pub fn import_archive<S: EntityStore>(store: &mut S, bytes: &[u8]) -> Result<ImportResult> {
    let entries = sl_archive::parse(bytes)?;
    let extraction = extract_entries(&entries)?;
    let data_path = locate_data_file(extraction.path())?;

    let json = std::fs::read(&data_path)?;
    let images_dir = data_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| extraction.path().to_path_buf());

    commit_decoded(store, &json, Some(images_dir.as_path()))
}

/// Import a bare interchange JSON payload (no archive, no image files).
pub fn import_json<S: EntityStore>(store: &mut S, bytes: &[u8]) -> Result<ImportResult> {
    commit_decoded(store, bytes, None)
}

fn commit_decoded<S: EntityStore>(
    store: &mut S,
    json: &[u8],
    images_dir: Option<&Path>,
) -> Result<ImportResult> {
    let batch = sl_interchange::decode_batch(json, images_dir, store.cruises())?;
    let imported = batch.records.len();
    let skipped = batch.skipped;

    store.commit_batch(batch.records)?;

    info!(imported, skipped, "import committed");
    Ok(ImportResult { imported, skipped })
}

/// Write decoded entries into a fresh temp directory.
///
/// Entries without payload (unsupported method, failed decode) and entries
/// whose path would escape the directory are skipped with a warning.
fn extract_entries(entries: &[ArchiveEntry]) -> Result<TempDir> {
    let dir = tempfile::Builder::new().prefix("shiplog-import-").tempdir()?;

    for entry in entries {
        let Some(relative) = sanitized(&entry.path) else {
            warn!(path = %entry.path, "entry path escapes the extraction root, skipping");
            continue;
        };
        let target = dir.path().join(relative);

        match entry.kind {
            EntryKind::Directory => {
                std::fs::create_dir_all(&target)?;
            }
            EntryKind::File => {
                let Some(payload) = entry.payload.as_deref() else {
                    warn!(path = %entry.path, "entry has no payload, skipping");
                    continue;
                };
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&target, payload)?;
                debug!(path = %entry.path, bytes = payload.len(), "entry extracted");
            }
        }
    }

    Ok(dir)
}

/// Reject archive paths that would land outside the extraction root.
fn sanitized(path: &str) -> Option<PathBuf> {
    let relative = Path::new(path.trim_end_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
        .then(|| relative.to_path_buf())
}

/// Find `data.json` at the root or inside exactly one directory level.
/// Subdirectories are probed in name order for a deterministic pick.
fn locate_data_file(root: &Path) -> Result<PathBuf> {
    let direct = root.join(DATA_FILE_NAME);
    if direct.is_file() {
        return Ok(direct);
    }

    let mut subdirs: Vec<PathBuf> = std::fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();

    for subdir in subdirs {
        let nested = subdir.join(DATA_FILE_NAME);
        if nested.is_file() {
            debug!(dir = %subdir.display(), "data.json found in subdirectory");
            return Ok(nested);
        }
    }

    Err(TransferError::MissingDataFile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_rejects_traversal() {
        assert!(sanitized("../evil.txt").is_none());
        assert!(sanitized("/abs/path").is_none());
        assert!(sanitized("").is_none());
        assert_eq!(sanitized("a/b.txt"), Some(PathBuf::from("a/b.txt")));
        assert_eq!(sanitized("dir/"), Some(PathBuf::from("dir")));
    }

    #[test]
    fn test_locate_data_file_prefers_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DATA_FILE_NAME), b"[]").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join(DATA_FILE_NAME), b"[]").unwrap();

        let found = locate_data_file(dir.path()).unwrap();
        assert_eq!(found, dir.path().join(DATA_FILE_NAME));
    }

    #[test]
    fn test_locate_data_file_probes_subdirs_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("b-export")).unwrap();
        std::fs::create_dir(dir.path().join("a-export")).unwrap();
        std::fs::write(dir.path().join("b-export").join(DATA_FILE_NAME), b"[]").unwrap();

        let found = locate_data_file(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("b-export").join(DATA_FILE_NAME));
    }

    #[test]
    fn test_locate_data_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("empty")).unwrap();
        assert!(matches!(
            locate_data_file(dir.path()),
            Err(TransferError::MissingDataFile)
        ));
    }
}
