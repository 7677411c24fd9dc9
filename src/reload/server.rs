//! WebSocket listener for live reload.
//!
//! Binds a TCP listener next to the HTTP server and feeds accepted
//! connections to the ws actor, which performs the handshake. Binding retries
//! upward from the base port so two dev instances can coexist; the injected
//! client script reads the actual port from the page.

use std::io::ErrorKind;
use std::net::{IpAddr, TcpListener};
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::actor::messages::WsMsg;

/// Default reload port, shared with the livereload ecosystem.
pub const BASE_WS_PORT: u16 = 35729;

/// Maximum port retry attempts
const MAX_PORT_RETRIES: u16 = 10;

/// Port the listener actually bound (the base port may have been taken).
static ACTUAL_WS_PORT: AtomicU16 = AtomicU16::new(0);

/// Port reload clients should connect to. Zero until the server starts.
pub fn ws_port() -> u16 {
    ACTUAL_WS_PORT.load(Ordering::Relaxed)
}

/// Start the accept loop on a background thread.
///
/// Accepted streams are handed to the ws actor for the handshake so a slow
/// client cannot stall accepting. Returns the port actually bound.
pub fn start_ws_server(
    interface: IpAddr,
    base_port: u16,
    ws_tx: mpsc::Sender<WsMsg>,
) -> Result<u16> {
    let (listener, actual_port) = try_bind_port(interface, base_port, MAX_PORT_RETRIES)?;
    listener
        .set_nonblocking(true)
        .context("failed to configure reload listener")?;
    ACTUAL_WS_PORT.store(actual_port, Ordering::Relaxed);
    crate::debug!("reload"; "listening on {interface}:{actual_port}");

    std::thread::spawn(move || {
        loop {
            if crate::core::is_shutdown() {
                break;
            }
            match listener.accept() {
                Ok((stream, addr)) => {
                    crate::debug!("reload"; "client connected: {addr}");
                    // Handshake runs in blocking mode on the actor side
                    let _ = stream.set_nonblocking(false);
                    if ws_tx.blocking_send(WsMsg::AddClient(stream)).is_err() {
                        break; // Actor gone
                    }
                }
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => {
                    std::thread::sleep(Duration::from_millis(100));
                }
                Err(e) => {
                    crate::log!("reload"; "accept error: {e}");
                    std::thread::sleep(Duration::from_millis(100));
                }
            }
        }
    });

    Ok(actual_port)
}

/// Bind `base_port`, walking up to the next port while taken.
fn try_bind_port(
    interface: IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(TcpListener, u16)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        match TcpListener::bind((interface, port)) {
            Ok(listener) => {
                let actual_port = listener.local_addr()?.port();
                return Ok((listener, actual_port));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "failed to bind reload port after {max_retries} attempts starting at {base_port}: {}",
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_bind_walks_past_taken_port() {
        let localhost = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let taken = TcpListener::bind((localhost, 0)).unwrap();
        let base = taken.local_addr().unwrap().port();

        let (listener, port) = try_bind_port(localhost, base, MAX_PORT_RETRIES).unwrap();
        assert_ne!(port, base);
        assert_eq!(listener.local_addr().unwrap().port(), port);
    }
}
