//! Actor Coordinator - watch mode wiring.
//!
//! Creates the channels, starts the reload listener, and runs both actors
//! until the shutdown signal arrives.

use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::fs::FsActor;
use super::messages::WsMsg;
use super::ws::WsActor;
use crate::config::Config;
use crate::reload::ReloadHandle;
use crate::reload::server::{BASE_WS_PORT, start_ws_server};

/// Channel buffer size
const CHANNEL_BUFFER: usize = 32;

/// Wires up and runs the actor system.
pub struct Coordinator {
    fs: FsActor,
    ws: WsActor,
    reload: ReloadHandle,
    shutdown_rx: Receiver<()>,
}

impl Coordinator {
    /// Wire up the actors and start the reload listener.
    ///
    /// The file watcher attaches here, before the initial build, so edits
    /// made during startup buffer instead of getting lost. Binding failures
    /// are fatal: a dev session without watch or reload is not worth having.
    pub fn start(config: &Config, shutdown_rx: Receiver<()>) -> Result<Self> {
        let (ws_tx, ws_rx) = mpsc::channel::<WsMsg>(CHANNEL_BUFFER);

        start_ws_server(config.serve.interface, BASE_WS_PORT, ws_tx.clone())?;

        let reload = ReloadHandle::new(ws_tx);
        let fs = FsActor::new(config, reload.clone())
            .context("failed to start the file watcher")?;
        let ws = WsActor::new(ws_rx);

        Ok(Self {
            fs,
            ws,
            reload,
            shutdown_rx,
        })
    }

    /// Run the actors until the shutdown signal.
    pub async fn run(self) {
        let Self {
            fs,
            ws,
            reload,
            shutdown_rx,
        } = self;

        crate::debug!("actor"; "start");

        let _fs_handle = tokio::spawn(fs.run());
        let ws_handle = tokio::spawn(ws.run());

        // The shutdown signal comes from the sync ctrlc handler; poll it
        loop {
            if shutdown_rx.try_recv().is_ok() {
                crate::debug!("actor"; "shutdown signal received");
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        // Give the ws actor a moment to close client connections
        reload.shutdown();
        let _ = tokio::time::timeout(Duration::from_millis(500), ws_handle).await;

        crate::debug!("actor"; "stopped");
    }
}
