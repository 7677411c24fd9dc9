//! Development flow: build, serve, watch, reload.
//!
//! Order matters here:
//! 1. actors wire up first so the watcher buffers edits made during startup
//! 2. initial styles + scripts build (fatal on script or write errors)
//! 3. HTTP server binds and registers for shutdown
//! 4. actor loops start processing buffered and new events
//! 5. the request loop blocks the main thread until Ctrl-C

mod content;
mod lifecycle;
mod path;
mod response;

use anyhow::Result;

use crate::actor::Coordinator;
use crate::config::Config;
use crate::log;
use crate::pipeline::{ScriptsTask, StylesTask, run_series};

/// Run the dev flow until externally terminated.
pub fn dev(config: &Config) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = crossbeam::channel::unbounded::<()>();
    let coordinator = Coordinator::start(config, shutdown_rx)?;

    // Initial build. Style diagnostics recover (serve goes on without fresh
    // css); script and write failures abort startup.
    run_series(&[&StylesTask, &ScriptsTask])?;

    let bound = lifecycle::bind_server(config, shutdown_tx)?;
    log!("serve"; "http://{}", bound.addr());
    log!("watch"; "watching {} (Ctrl-C to stop)",
        config.root_relative(&config.build.source).display());

    let actor_handle = lifecycle::spawn_actors(coordinator);
    bound.run();
    lifecycle::wait_for_shutdown(actor_handle);
    Ok(())
}
