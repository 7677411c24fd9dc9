//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Kiln asset pipeline CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: kiln.toml)
    #[arg(short = 'C', long, default_value = "kiln.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Subcommand; omitted means `dev`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile styles and scripts once and exit
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        shared: SharedArgs,
    },

    /// Start the dev server: build, serve, watch, reload
    #[command(visible_alias = "d")]
    Dev {
        #[command(flatten)]
        shared: SharedArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Shared arguments for Build and Dev commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SharedArgs {
    /// Emit source map sidecars next to artifacts
    #[arg(short = 'm', long = "source-maps", action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub source_maps: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    /// Bare `kiln` is the dev flow.
    pub const fn is_dev(&self) -> bool {
        matches!(self.command, Some(Commands::Dev { .. }) | None)
    }
}

// =============================================================================
// Tests
// =============================================================================
