//! Kiln - a front-end asset pipeline with a live-reloading dev server.

mod actor;
mod cli;
mod compiler;
mod config;
mod core;
mod embed;
mod logger;
mod pipeline;
mod reload;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{Config, init_config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    // Only the dev flow runs until interrupted; one-shot builds take the
    // default SIGINT behavior
    if cli.is_dev() {
        core::setup_shutdown_handler()?;
    }

    let config = init_config(Config::load(&cli)?);

    match &cli.command {
        Some(Commands::Build { .. }) => cli::build::build(&config),
        Some(Commands::Dev { .. }) | None => cli::dev::dev(&config),
    }
}
