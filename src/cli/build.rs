//! One-shot production build.

use std::time::Instant;

use anyhow::Result;

use crate::config::Config;
use crate::log;
use crate::pipeline::{ScriptsTask, StylesTask, Task, TaskOutcome};

/// Run both pipelines once and exit.
///
/// Styles and scripts are independent, so they run in parallel. A recovered
/// style diagnostic still counts as a successful build (the diagnostic was
/// already logged); fatal failures bubble up as a non-zero exit.
pub fn build(config: &Config) -> Result<()> {
    let started = Instant::now();

    let (styles, scripts) = rayon::join(|| StylesTask.run(), || ScriptsTask.run());
    let styles = styles?;
    scripts?;

    let elapsed = started.elapsed().as_millis();
    match styles {
        TaskOutcome::Recovered => {
            log!("build"; "finished in {elapsed}ms (styles kept previous output)");
        }
        TaskOutcome::Done => {
            log!("build"; "finished in {}ms → {}",
                elapsed,
                config.root_relative(&config.build.output).display());
        }
    }
    Ok(())
}
