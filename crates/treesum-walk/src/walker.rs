//! Channel-based concurrent directory walker.
//!
//! Each directory is handled by one spawned task — a traversal unit. A unit
//! stats its own directory, turns non-directory entries into [`FileEntry`]
//! values synchronously, and spawns one child unit per subdirectory. Children
//! report back through a result/error channel pair owned by the parent call;
//! the parent's fan-in loop runs until both channels close, which happens
//! exactly when the last child task has dropped its senders. The channels'
//! sender count is the completion counter — no state is shared between
//! sibling units.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use compact_str::CompactString;
use tokio::sync::Semaphore;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use treesum_core::{DirNode, FileEntry, WalkConfig, WalkError};

/// Concurrent traversal engine.
///
/// Owns the cancellation token for its walk, so callers can abort an
/// in-flight traversal from outside. The walk also cancels the token itself
/// when the first error surfaces, stopping sibling branches promptly instead
/// of letting them run to completion.
#[derive(Debug, Default)]
pub struct TreeWalker {
    cancel: CancellationToken,
}

impl TreeWalker {
    /// Create a new walker.
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
        }
    }

    /// Token that aborts this walker's traversal when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Walk the configured root and return its fully aggregated node.
    ///
    /// Fails with the first [`WalkError`] forwarded out of the tree. Units
    /// still in flight at that point observe the cancelled token and wind
    /// down; their late sends land on closed channels and are discarded.
    pub async fn walk(&self, config: &WalkConfig) -> Result<DirNode, WalkError> {
        let limiter = config.max_in_flight.map(|n| Arc::new(Semaphore::new(n)));

        let (dir_tx, mut dir_rx) = mpsc::unbounded_channel();
        let (err_tx, mut err_rx) = mpsc::unbounded_channel();

        tokio::spawn(walk_unit(
            config.root.clone(),
            limiter,
            self.cancel.clone(),
            dir_tx,
            err_tx,
        ));

        // An error anywhere in the tree reaches this channel before the root
        // node can: every ancestor forwards it during fan-in, strictly before
        // publishing its own node. `biased` keeps the preference
        // deterministic when both are ready at once.
        tokio::select! {
            biased;

            Some(err) = err_rx.recv() => {
                self.cancel.cancel();
                Err(err)
            }
            Some(root) = dir_rx.recv() => Ok(root),
            // Both channels closing without a message means the root unit
            // died without reporting.
            else => Err(WalkError::Interrupted),
        }
    }
}

/// One traversal unit: stat `path`, list it, spawn a child unit per
/// subdirectory, fan the children's outcomes back in, then publish the
/// aggregated node. Outcomes leave through `dir_tx`/`err_tx` only.
///
/// Returns a boxed future because the recursion goes through `tokio::spawn`
/// and an async fn calling itself has no sized future type.
fn walk_unit(
    path: PathBuf,
    limiter: Option<Arc<Semaphore>>,
    cancel: CancellationToken,
    dir_tx: UnboundedSender<DirNode>,
    err_tx: UnboundedSender<WalkError>,
) -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(async move {
        if cancel.is_cancelled() {
            let _ = err_tx.send(WalkError::Interrupted);
            return;
        }

        // The permit bounds concurrent filesystem work and must not outlive
        // the listing phase: a parent holding a permit while waiting on its
        // children would deadlock a bounded walk on a deep tree.
        let permit = match &limiter {
            Some(semaphore) => {
                tokio::select! {
                    permit = Arc::clone(semaphore).acquire_owned() => match permit {
                        Ok(permit) => Some(permit),
                        Err(_) => {
                            let _ = err_tx.send(WalkError::Interrupted);
                            return;
                        }
                    },
                    _ = cancel.cancelled() => {
                        let _ = err_tx.send(WalkError::Interrupted);
                        return;
                    }
                }
            }
            None => None,
        };

        // lstat: a symlink root counts its own size, never the target's.
        let meta = match tokio::fs::symlink_metadata(&path).await {
            Ok(meta) => meta,
            Err(err) => {
                let _ = err_tx.send(WalkError::io(&path, err));
                return;
            }
        };

        let mut entries = match tokio::fs::read_dir(&path).await {
            Ok(entries) => entries,
            Err(err) => {
                let _ = err_tx.send(WalkError::io(&path, err));
                return;
            }
        };

        let mut size = meta.len();
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        // Per-call channel pair, scoped to this unit's children.
        let (sub_dir_tx, mut sub_dir_rx) = mpsc::unbounded_channel();
        let (sub_err_tx, mut sub_err_rx) = mpsc::unbounded_channel();
        let mut spawned = 0usize;

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => {
                    let _ = err_tx.send(WalkError::io(&path, err));
                    return;
                }
            };
            // DirEntry::metadata does not traverse symlinks, so a symlink to
            // a directory lands in `files` with the link's own size.
            let entry_meta = match entry.metadata().await {
                Ok(meta) => meta,
                Err(err) => {
                    let _ = err_tx.send(WalkError::io(entry.path(), err));
                    return;
                }
            };
            if entry_meta.is_dir() {
                spawned += 1;
                tokio::spawn(walk_unit(
                    entry.path(),
                    limiter.clone(),
                    cancel.clone(),
                    sub_dir_tx.clone(),
                    sub_err_tx.clone(),
                ));
            } else {
                size += entry_meta.len();
                files.push(FileEntry::new(
                    CompactString::new(entry.file_name().to_string_lossy()),
                    entry_meta.len(),
                ));
            }
        }

        // Filesystem work for this unit is done; free the permit before the
        // fan-in wait.
        drop(permit);

        // Dropping our own senders arms the completion signal: once every
        // child task terminates, the channels close and both `recv` calls
        // below return `None`.
        drop(sub_dir_tx);
        drop(sub_err_tx);

        trace!(
            path = %path.display(),
            subdirs = spawned,
            files = files.len(),
            "fan-out complete"
        );

        let mut dirs_open = true;
        let mut errs_open = true;
        while dirs_open || errs_open {
            tokio::select! {
                child = sub_dir_rx.recv(), if dirs_open => match child {
                    Some(child) => {
                        size += child.size;
                        dirs.push(child);
                    }
                    None => dirs_open = false,
                },
                err = sub_err_rx.recv(), if errs_open => match err {
                    // Errors pass through unchanged. The loop keeps draining
                    // so every child's completion is still observed.
                    Some(err) => {
                        let _ = err_tx.send(err);
                    }
                    None => errs_open = false,
                },
            }
        }

        debug!(path = %path.display(), size, "directory aggregated");

        let _ = dir_tx.send(DirNode {
            name: dir_name(&path),
            size,
            dirs,
            files,
        });
    })
}

/// Display name for a directory: the final path component, or the path
/// itself when there is none (`/`, `.`).
pub(crate) fn dir_name(path: &Path) -> CompactString {
    path.file_name()
        .map(|name| CompactString::new(name.to_string_lossy()))
        .unwrap_or_else(|| CompactString::new(path.to_string_lossy()))
}
