//! Actor message definitions.

use std::net::TcpStream;

/// Messages to the WebSocket actor.
pub enum WsMsg {
    /// Broadcast a reload to every connected client.
    Reload,
    /// Register a freshly accepted client connection.
    AddClient(TcpStream),
    /// Close all client connections and stop.
    Shutdown,
}
