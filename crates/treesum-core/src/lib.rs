//! Core types for treesum.
//!
//! This crate provides the tree model produced by the traversal engine and
//! consumed by the renderer: file and directory nodes, walk configuration,
//! errors, and derived summary statistics. It performs no I/O.

mod config;
mod error;
mod node;
mod render;
mod summary;

pub use config::{WalkConfig, WalkConfigBuilder};
pub use error::WalkError;
pub use node::{DirNode, FileEntry};
pub use summary::TreeSummary;
