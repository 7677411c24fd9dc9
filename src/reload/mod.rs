//! Live reload plumbing for the dev server.
//!
//! Rebuilds notify browsers through a WebSocket broadcast: pipelines push
//! into the ws actor's inbox through [`ReloadHandle`] and the actor fans the
//! message out to every connected client. Delivery is best-effort end to end;
//! a closed tab or a full inbox never fails a rebuild.
//!
//! - `message` - JSON wire protocol sent to browsers
//! - `server` - TCP listener feeding accepted clients to the ws actor

pub mod message;
pub mod server;

pub use message::ReloadMessage;

use tokio::sync::mpsc;

use crate::actor::messages::WsMsg;

/// Pipeline-facing handle to the reload broadcast.
#[derive(Clone)]
pub struct ReloadHandle {
    tx: mpsc::Sender<WsMsg>,
}

impl ReloadHandle {
    pub fn new(tx: mpsc::Sender<WsMsg>) -> Self {
        Self { tx }
    }

    /// Queue a reload broadcast. A full inbox means a reload is already
    /// pending and a closed inbox means the actor is gone; both are dropped.
    pub fn notify_reload(&self) {
        let _ = self.tx.try_send(WsMsg::Reload);
    }

    /// Ask the ws actor to close client connections and stop. Best-effort,
    /// used on the way out of the process.
    pub fn shutdown(&self) {
        let _ = self.tx.try_send(WsMsg::Shutdown);
    }
}
