//! Walk configuration.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for a tree walk.
///
/// Passed explicitly into the traversal entry point; there is no process-wide
/// state.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Root directory to walk.
    pub root: PathBuf,

    /// Upper bound on traversal units concurrently performing filesystem
    /// I/O. `None` means unbounded fan-out: one live task per directory.
    #[builder(default)]
    #[serde(default)]
    pub max_in_flight: Option<usize>,
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("root path cannot be empty".to_string());
            }
        } else {
            return Err("root path is required".to_string());
        }
        if let Some(Some(0)) = self.max_in_flight {
            return Err("max_in_flight must be at least 1".to_string());
        }
        Ok(())
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Create a config with default settings for the given root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_in_flight: None,
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
