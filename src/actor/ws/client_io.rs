//! Client connection lifecycle: handshake, greeting, disconnect detection.

use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::WsActor;
use crate::reload::ReloadMessage;

impl WsActor {
    /// Complete the WebSocket handshake and register the client.
    pub(super) fn add_client(&self, stream: TcpStream) {
        // Handshake in blocking mode, then non-blocking for polled reads
        match tungstenite::accept(stream) {
            Ok(mut ws) => {
                let _ = ws.get_ref().set_nonblocking(true);

                let greeting = ReloadMessage::connected();
                if let Err(e) = ws.send(Message::Text(greeting.to_json().into())) {
                    crate::log!("ws"; "failed to send connected message: {e}");
                    return;
                }

                let mut clients = self.clients.lock();
                clients.push(ws);
                crate::debug!("ws"; "client registered (total: {})", clients.len());
            }
            Err(e) => {
                crate::log!("ws"; "handshake failed: {e}");
            }
        }
    }

    /// Poll client sockets for close frames and dead connections.
    ///
    /// Reload clients never send application messages; reads exist to consume
    /// control frames and notice closed tabs between broadcasts.
    pub(super) fn drain_loop(clients: &Arc<Mutex<Vec<WebSocket<TcpStream>>>>) {
        loop {
            std::thread::sleep(Duration::from_millis(100));
            if crate::core::is_shutdown() {
                break;
            }

            let mut clients_guard = clients.lock();
            let mut disconnected = Vec::new();

            for (i, ws) in clients_guard.iter_mut().enumerate() {
                match ws.read() {
                    Ok(Message::Close(_)) => disconnected.push(i),
                    Ok(_) => {}
                    Err(tungstenite::Error::Io(ref e))
                        if e.kind() == std::io::ErrorKind::WouldBlock => {}
                    Err(_) => disconnected.push(i),
                }
            }

            for i in disconnected.into_iter().rev() {
                clients_guard.remove(i);
                crate::debug!("ws"; "client disconnected (total: {})", clients_guard.len());
            }
        }
    }
}
