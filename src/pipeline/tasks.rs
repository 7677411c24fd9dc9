//! The concrete pipeline tasks: styles, scripts, reload.
//!
//! Tasks read the live config snapshot at run time, so a pipeline assembled
//! once keeps honoring CLI overrides applied at startup.

use super::{Task, TaskOutcome};
use crate::compiler::{compile_scripts, compile_styles, write_artifact};
use crate::config::cfg;
use crate::reload::ReloadHandle;
use crate::{debug, log};
use anyhow::Result;
use std::time::Instant;

/// Compile the stylesheet entry and write its artifact.
///
/// Stylesheet diagnostics are recoverable: logged here, previous artifact
/// stays in place, series continues.
pub struct StylesTask;

impl Task for StylesTask {
    fn name(&self) -> &'static str {
        "styles"
    }

    fn run(&self) -> Result<TaskOutcome> {
        let config = cfg();
        let started = Instant::now();

        let artifact = match compile_styles(&config) {
            Ok(artifact) => artifact,
            Err(err) if err.is_recoverable() => {
                log!("error"; "{err}");
                return Ok(TaskOutcome::Recovered);
            }
            Err(err) => return Err(err.into()),
        };

        let out = write_artifact(&artifact, &config.build.output)?;
        debug!("styles"; "{} ({}ms)",
            config.root_relative(&out).display(),
            started.elapsed().as_millis());
        Ok(TaskOutcome::Done)
    }
}

/// Compile the script entry and write its artifact.
///
/// Unlike styles, every script failure is fatal to the enclosing run.
pub struct ScriptsTask;

impl Task for ScriptsTask {
    fn name(&self) -> &'static str {
        "scripts"
    }

    fn run(&self) -> Result<TaskOutcome> {
        let config = cfg();
        let started = Instant::now();

        let artifact = compile_scripts(&config)?;
        let out = write_artifact(&artifact, &config.build.output)?;
        debug!("scripts"; "{} ({}ms)",
            config.root_relative(&out).display(),
            started.elapsed().as_millis());
        Ok(TaskOutcome::Done)
    }
}

/// Ask connected browsers to reload.
///
/// Best-effort, at most once per run: delivery problems never fail the
/// pipeline.
pub struct ReloadTask {
    reload: ReloadHandle,
}

impl ReloadTask {
    pub fn new(reload: ReloadHandle) -> Self {
        Self { reload }
    }
}

impl Task for ReloadTask {
    fn name(&self) -> &'static str {
        "reload"
    }

    fn run(&self) -> Result<TaskOutcome> {
        self.reload.notify_reload();
        Ok(TaskOutcome::Done)
    }
}

// ============================================================================
// tests
// ============================================================================
