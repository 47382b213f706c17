//! Single-threaded reference traversal.
//!
//! Same semantics as the concurrent walker, one call frame per directory.
//! This is the trivially auditable implementation the concurrent engine is
//! checked against, and it backs the CLI's `--sequential` mode.

use std::fs;
use std::path::Path;

use compact_str::CompactString;

use treesum_core::{DirNode, FileEntry, WalkError};

use crate::walker::dir_name;

/// Recursively walk `path` without any concurrency, failing on the first
/// error encountered.
pub fn walk_sync(path: &Path) -> Result<DirNode, WalkError> {
    let meta = fs::symlink_metadata(path).map_err(|err| WalkError::io(path, err))?;

    let mut size = meta.len();
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(path).map_err(|err| WalkError::io(path, err))? {
        let entry = entry.map_err(|err| WalkError::io(path, err))?;
        let entry_meta = entry
            .metadata()
            .map_err(|err| WalkError::io(entry.path(), err))?;
        if entry_meta.is_dir() {
            let dir = walk_sync(&entry.path())?;
            size += dir.size;
            dirs.push(dir);
        } else {
            size += entry_meta.len();
            files.push(FileEntry::new(
                CompactString::new(entry.file_name().to_string_lossy()),
                entry_meta.len(),
            ));
        }
    }

    Ok(DirNode {
        name: dir_name(path),
        size,
        dirs,
        files,
    })
}
