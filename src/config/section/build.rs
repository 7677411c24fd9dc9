//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "app"         # watched source tree
//! output = "dist"        # destination directory for compiled assets
//! source_maps = true     # emit .map sidecars next to compiled output
//! ```

use serde::Deserialize;
use std::path::PathBuf;

/// Source/output layout settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Source tree watched for style/script changes, relative to the root.
    pub source: PathBuf,

    /// Destination directory for compiled assets, relative to the root.
    pub output: PathBuf,

    /// Emit source map sidecars next to compiled output.
    pub source_maps: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("app"),
            output: PathBuf::from("dist"),
            source_maps: true,
        }
    }
}
