//! `[scripts]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [scripts]
//! entry = "app/js/main.js"    # script entry point
//! target = "es2018"           # transpile floor
//! ```

use serde::Deserialize;
use std::path::PathBuf;

/// Script pipeline settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    /// Script entry point, relative to the project root.
    pub entry: PathBuf,

    /// ECMAScript version modern syntax is transpiled down to.
    pub target: String,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            entry: PathBuf::from("app/js/main.js"),
            target: "es2018".to_string(),
        }
    }
}
