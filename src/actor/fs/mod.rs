//! FileSystem Actor
//!
//! Watches the project for changes and runs the bound pipelines on debounced
//! batches. Implements the "Watcher-First" pattern: the watcher attaches
//! before the initial build, so edits made during startup are buffered
//! rather than lost.
//!
//! ```text
//! notify → Debouncer (pure timing) → bindings (classification) → run_series
//! ```
//!
//! Pipelines run inline on the actor loop: events arriving during a rebuild
//! pile up in the channel and coalesce into the next batch (trailing edge).

mod bindings;
mod debouncer;
mod types;
mod watch_roots;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use notify::{RecommendedWatcher, RecursiveMode};
use tokio::sync::mpsc;

use crate::config::{Config, cfg};
use crate::logger::{status_error, status_success, status_warning};
use crate::pipeline::{ReloadTask, ScriptsTask, StylesTask, TaskOutcome, run_series};
use crate::reload::ReloadHandle;

use bindings::TriggeredBindings;
use debouncer::Debouncer;
use watch_roots::WatchRoots;

/// FileSystem actor - watches for file changes.
pub struct FsActor {
    /// Channel to receive notify events (sync side of the bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    /// Watch-root consistency layer (attach/re-attach root directories)
    watch_roots: WatchRoots,
    /// Reload broadcast passed to the pipelines
    reload: ReloadHandle,
    /// Debouncer state
    debouncer: Debouncer,
}

impl FsActor {
    /// Create the actor and attach the watcher immediately.
    ///
    /// Call before the initial build: events fired while building buffer in
    /// the channel and are processed once [`run`](Self::run) starts.
    pub fn new(config: &Config, reload: ReloadHandle) -> notify::Result<Self> {
        // notify's callback is sync; buffer into a std channel and bridge
        // to the async loop in run()
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        // The project root is shallow on purpose: html under the source or
        // output trees belongs to no binding
        let mut watch_roots = WatchRoots::new(vec![
            (config.root.clone(), RecursiveMode::NonRecursive),
            (config.build.source.clone(), RecursiveMode::Recursive),
        ]);
        watch_roots.attach_existing(&mut watcher)?;

        Ok(Self {
            notify_rx,
            watcher,
            watch_roots,
            reload,
            debouncer: Debouncer::new(),
        })
    }

    /// Run the actor event loop until shutdown.
    pub async fn run(self) {
        let Self {
            notify_rx,
            mut watcher,
            mut watch_roots,
            reload,
            mut debouncer,
        } = self;

        let (async_tx, mut async_rx) = mpsc::channel::<notify::Event>(64);

        // Bridge thread: std mpsc (notify) → tokio mpsc
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {e}"),
                }
            }
        });

        loop {
            tokio::select! {
                biased;
                Some(event) = async_rx.recv() => debouncer.add_event(&event),
                _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                    if crate::core::is_shutdown() {
                        break;
                    }
                    // Re-attach roots that were deleted and recreated
                    watch_roots.maintain(&mut watcher);
                    process_changes(&mut debouncer, &reload);
                }
            }
        }
    }
}

/// Run the bound pipelines for one debounced batch, if any is due.
fn process_changes(debouncer: &mut Debouncer, reload: &ReloadHandle) {
    let Some(raw) = debouncer.take_if_ready() else {
        return;
    };

    for (path, kind) in &raw {
        crate::debug!("watch"; "{}: {}", kind.label(), path.display());
    }

    let config = cfg();
    let Some(batch) = TriggeredBindings::classify(raw, &config) else {
        return;
    };

    run_bindings(&batch, &config, reload);
}

/// Run each triggered binding's task series, markup first.
///
/// A failed series is reported and dropped; the watcher stays alive and the
/// next change retries.
fn run_bindings(batch: &TriggeredBindings, config: &Config, reload: &ReloadHandle) {
    if !batch.markup.is_empty() {
        let changed = display_paths(&batch.markup, config);
        let reload_task = ReloadTask::new(reload.clone());
        match run_series(&[&reload_task]) {
            Ok(_) => status_success(&format!("reloaded: {changed}")),
            Err(err) => status_error("reload failed", &format!("{err:#}")),
        }
    }

    if !batch.sources.is_empty() {
        let changed = display_paths(&batch.sources, config);
        let started = std::time::Instant::now();
        let reload_task = ReloadTask::new(reload.clone());
        match run_series(&[&StylesTask, &ScriptsTask, &reload_task]) {
            Ok(TaskOutcome::Done) => status_success(&format!(
                "rebuilt in {}ms: {changed}",
                started.elapsed().as_millis()
            )),
            // Style diagnostic was already logged; previous css stays live
            Ok(TaskOutcome::Recovered) => {
                status_warning(&format!("rebuilt with diagnostics: {changed}"));
            }
            Err(err) => status_error("rebuild failed", &format!("{err:#}")),
        }
    }
}

/// Comma-joined root-relative paths for status lines.
fn display_paths(paths: &[PathBuf], config: &Config) -> String {
    paths
        .iter()
        .map(|p| config.root_relative(p).display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
