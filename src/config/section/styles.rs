//! `[styles]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [styles]
//! entry = "app/styles/main.css"        # stylesheet entry point
//! targets = ["last 2 versions"]        # browserslist queries
//! ```
//!
//! `targets` drives both syntax lowering (nesting, custom media, modern color
//! functions) and vendor prefixing.

use serde::Deserialize;
use std::path::PathBuf;

/// Style pipeline settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StylesConfig {
    /// Stylesheet entry point, relative to the project root.
    pub entry: PathBuf,

    /// Browserslist queries the compiled CSS must support.
    pub targets: Vec<String>,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            entry: PathBuf::from("app/styles/main.css"),
            targets: vec!["defaults".to_string()],
        }
    }
}
