//! Server lifecycle management.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::Result;
use crossbeam::channel::Sender;
use tiny_http::Server;

use crate::actor::Coordinator;
use crate::config::Config;
use crate::core::register_server;
use crate::log;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bound server ready to accept requests.
pub(super) struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
}

/// Bind the HTTP server and register it for shutdown.
///
/// Registration is one-shot per process; the Ctrl-C handler owns the
/// `unblock` call that ends the request loop.
pub(super) fn bind_server(config: &Config, shutdown_tx: Sender<()>) -> Result<BoundServer> {
    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    register_server(Arc::clone(&server), shutdown_tx);

    Ok(BoundServer { server, addr })
}

impl BoundServer {
    pub(super) fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the request loop (blocking) until the server is unblocked.
    pub(super) fn run(self) {
        // Thread pool keeps one slow response from stalling the rest
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .expect("failed to create thread pool");

        for request in self.server.incoming_requests() {
            pool.spawn(move || {
                if let Err(e) = super::response::handle_request(request) {
                    log!("serve"; "request error: {e:#}");
                }
            });
        }
    }
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < MAX_PORT_RETRIES => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "failed to bind after {} attempts (ports {}-{}): {}",
                    MAX_PORT_RETRIES,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

/// Run the actor system on its own runtime thread.
pub(super) fn spawn_actors(coordinator: Coordinator) -> JoinHandle<()> {
    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("failed to create tokio runtime");

        rt.block_on(coordinator.run());
    })
}

/// Wait for the actor system to shut down gracefully (max 2 seconds).
pub(super) fn wait_for_shutdown(handle: JoinHandle<()>) {
    for _ in 0..40 {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(std::time::Duration::from_millis(50));
    }
}
