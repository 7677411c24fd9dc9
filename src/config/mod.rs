//! Project configuration management for `kiln.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]  (source/output dirs, source maps)
//! │   ├── scripts    # [scripts] (entry, transpile target)
//! │   ├── serve      # [serve]  (interface, port)
//! │   └── styles     # [styles] (entry, browser targets)
//! ├── error.rs       # ConfigError
//! ├── handle.rs      # Global config handle
//! └── mod.rs         # Config (this file)
//! ```
//!
//! A config file is optional: when no `kiln.toml` is found, every section
//! falls back to its defaults and the project root is the working directory.

pub mod section;

mod error;
mod handle;

pub use error::ConfigError;
pub use handle::{cfg, init_config};
pub use section::{BuildConfig, ScriptsConfig, ServeConfig, StylesConfig};

use crate::{
    cli::{Cli, Commands, SharedArgs},
    log,
};
use anyhow::Result;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing kiln.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Style pipeline settings
    #[serde(default)]
    pub styles: StylesConfig,

    /// Script pipeline settings
    #[serde(default)]
    pub scripts: ScriptsConfig,

    /// Source/output layout settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            styles: StylesConfig::default(),
            scripts: ScriptsConfig::default(),
            build: BuildConfig::default(),
            serve: ServeConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file; a missing file is not an
    /// error (defaults apply, rooted at cwd).
    pub fn load(cli: &Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        let mut config = if exists {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.config_path = config_path;
        config.finalize(cli, exists);

        Ok(config)
    }

    /// Resolve config file path: upward search from cwd.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        use anyhow::Context;

        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        match find_config_file(&cli.config) {
            Some(path) => Ok((path, true)),
            None => Ok((cwd.join(&cli.config), false)),
        }
    }

    /// Finalize configuration after loading.
    ///
    /// Resolves the project root, normalizes all configured paths to absolute
    /// form, and applies CLI overrides.
    fn finalize(&mut self, cli: &Cli, config_exists: bool) {
        let root = if config_exists {
            self.config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        } else {
            std::env::current_dir().unwrap_or_default()
        };

        let root = crate::utils::path::normalize_path(&root);
        self.config_path = crate::utils::path::normalize_path(&self.config_path);

        self.styles.entry = root.join(&self.styles.entry);
        self.scripts.entry = root.join(&self.scripts.entry);
        self.build.source = root.join(&self.build.source);
        self.build.output = root.join(&self.build.output);
        self.root = root;

        self.apply_command_options(cli);
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Get path relative to the project root (for display).
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Some(Commands::Build { shared }) => {
                self.apply_shared_args(shared);
            }
            Some(Commands::Dev {
                shared,
                interface,
                port,
            }) => {
                self.apply_shared_args(shared);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            // Bare `kiln` runs the dev flow with defaults
            None => {}
        }
    }

    /// Apply shared arguments from CLI.
    fn apply_shared_args(&mut self, args: &SharedArgs) {
        crate::logger::set_verbose(args.verbose);
        Self::update_option(&mut self.build.source_maps, args.source_maps.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }
}

/// Find config file by searching upward from current directory.
///
/// Starts from cwd and walks up parent directories until finding `config_name`.
/// Returns the absolute path to the config file if found.
fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;

    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    let (parsed, ignored) = Config::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {ignored:?}"
    );
    parsed
}

/// Build a finalized config rooted at `root`, with defaults everywhere else.
#[cfg(test)]
pub fn test_config_at(root: &Path) -> Config {
    let mut config = Config::default();
    config.styles.entry = root.join(&config.styles.entry);
    config.scripts.entry = root.join(&config.scripts.entry);
    config.build.source = root.join(&config.build.source);
    config.build.output = root.join(&config.build.output);
    config.root = root.to_path_buf();
    config
}

// ============================================================================
// tests
// ============================================================================
