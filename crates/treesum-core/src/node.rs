//! File and directory node types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A single non-directory entry inside a directory.
///
/// Created once when the parent directory is listed and never mutated. The
/// size comes from `lstat`, so a symlink carries the link's own size rather
/// than the target's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// File name (not full path).
    pub name: CompactString,
    /// Size in bytes.
    pub size: u64,
}

impl FileEntry {
    /// Create a new file entry.
    pub fn new(name: impl Into<CompactString>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// A fully aggregated directory node.
///
/// `size` is the recursive total: the directory's own metadata size plus the
/// sizes of all files plus the recursive sizes of all subdirectories. A node
/// is constructed in one step after every child has reported back; consumers
/// never observe a partially aggregated node. The node exclusively owns its
/// children — tree ownership, no sharing, no cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirNode {
    /// Directory name (not full path).
    pub name: CompactString,
    /// Recursive total size in bytes.
    pub size: u64,
    /// Child directories.
    pub dirs: Vec<DirNode>,
    /// Child files.
    pub files: Vec<FileEntry>,
}

impl DirNode {
    /// Create a directory node with no children.
    pub fn new(name: impl Into<CompactString>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            dirs: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Total number of files in this subtree.
    pub fn file_count(&self) -> u64 {
        self.files.len() as u64 + self.dirs.iter().map(DirNode::file_count).sum::<u64>()
    }

    /// Total number of directories in this subtree, not counting this one.
    pub fn dir_count(&self) -> u64 {
        self.dirs.len() as u64 + self.dirs.iter().map(DirNode::dir_count).sum::<u64>()
    }

    /// Number of direct children (files plus subdirectories).
    pub fn child_count(&self) -> usize {
        self.files.len() + self.dirs.len()
    }

    /// Sum of the direct children's sizes: file sizes plus subdirectory
    /// totals. The difference `size - entries_size()` is the directory's own
    /// metadata size.
    pub fn entries_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum::<u64>()
            + self.dirs.iter().map(|d| d.size).sum::<u64>()
    }
}
