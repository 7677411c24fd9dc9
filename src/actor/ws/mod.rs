//! WebSocket Actor - reload broadcast
//!
//! Owns the set of connected browser clients:
//! - registers new connections (handshake + greeting)
//! - broadcasts reload messages to every client
//! - drops clients that disconnect
//!
//! ```text
//! pipelines --[Reload]--> WsActor --broadcast--> browsers
//! accept loop --[AddClient]--^
//! ```

mod client_io;
mod delivery;

use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::messages::WsMsg;
use crate::reload::ReloadMessage;

/// WebSocket actor - manages client connections and broadcasts.
pub struct WsActor {
    /// Inbox
    rx: mpsc::Receiver<WsMsg>,
    /// Connected clients, shared with the drain thread
    clients: Arc<Mutex<Vec<WebSocket<TcpStream>>>>,
}

impl WsActor {
    pub fn new(rx: mpsc::Receiver<WsMsg>) -> Self {
        Self {
            rx,
            clients: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Run the actor event loop.
    pub async fn run(mut self) {
        // Background thread notices closed tabs between broadcasts
        let clients_for_drain = Arc::clone(&self.clients);
        std::thread::spawn(move || {
            Self::drain_loop(&clients_for_drain);
        });

        while let Some(msg) = self.rx.recv().await {
            match msg {
                WsMsg::Reload => {
                    crate::debug!("ws"; "sending reload");
                    self.broadcast(Message::Text(ReloadMessage::Reload.to_json().into()));
                }
                WsMsg::AddClient(stream) => self.add_client(stream),
                WsMsg::Shutdown => {
                    crate::debug!("ws"; "shutting down");
                    let mut clients = self.clients.lock();
                    for mut ws in clients.drain(..) {
                        let _ = ws.close(None);
                    }
                    break;
                }
            }
        }
    }
}
