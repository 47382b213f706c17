//! Derived whole-tree statistics.

use serde::{Deserialize, Serialize};

use crate::node::DirNode;

/// Summary statistics for a finished tree.
///
/// Computed by a pure walk over an already-aggregated [`DirNode`]; nothing
/// here touches the filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSummary {
    /// Recursive total size in bytes.
    pub total_size: u64,
    /// Number of files in the tree.
    pub total_files: u64,
    /// Number of directories, including the root.
    pub total_dirs: u64,
    /// Deepest directory level reached (root = 0).
    pub max_depth: u32,
}

impl DirNode {
    /// Compute summary statistics for this subtree.
    pub fn summarize(&self) -> TreeSummary {
        let mut summary = TreeSummary {
            total_size: self.size,
            ..TreeSummary::default()
        };
        self.accumulate(0, &mut summary);
        summary
    }

    fn accumulate(&self, depth: u32, summary: &mut TreeSummary) {
        summary.total_dirs += 1;
        summary.total_files += self.files.len() as u64;
        summary.max_depth = summary.max_depth.max(depth);
        for dir in &self.dirs {
            dir.accumulate(depth + 1, summary);
        }
    }
}
