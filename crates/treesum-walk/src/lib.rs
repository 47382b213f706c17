//! Directory traversal engine for treesum.
//!
//! This crate walks a directory tree and builds the aggregated size tree
//! from [`treesum_core`]. Key properties:
//!
//! - **Recursive fan-out** — one spawned task per subdirectory, unbounded by
//!   default, gated by a semaphore when a limit is configured
//! - **Channel-based fan-in** — each traversal unit owns a private
//!   result/error channel pair; parents aggregate children bottom-up and no
//!   partially built node is ever visible
//! - **Fail-fast** — the first error anywhere in the tree fails the walk and
//!   cancels the branches still in flight
//!
//! # Example
//!
//! ```rust,no_run
//! use treesum_walk::{TreeWalker, WalkConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), treesum_walk::WalkError> {
//! let config = WalkConfig::new("/path/to/walk");
//! let tree = TreeWalker::new().walk(&config).await?;
//!
//! println!("total size: {} bytes", tree.size);
//! print!("{}", tree.render());
//! # Ok(())
//! # }
//! ```

mod baseline;
mod walker;

pub use baseline::walk_sync;
pub use walker::TreeWalker;

// Re-export core types for convenience
pub use treesum_core::{DirNode, FileEntry, TreeSummary, WalkConfig, WalkError};
