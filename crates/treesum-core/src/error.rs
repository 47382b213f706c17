//! Error types for tree traversal.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while walking a directory tree.
///
/// Every stat/list failure maps to one of these; they are forwarded verbatim
/// from the unit that hit them, through every ancestor, to the top-level
/// caller. Nothing is retried or downgraded to a warning.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Permission denied for a path.
    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// Expected a directory, found something else.
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The walk was cancelled.
    #[error("walk interrupted")]
    Interrupted,

    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl WalkError {
    /// Wrap an I/O error with path context, carving out the common kinds.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }
}
