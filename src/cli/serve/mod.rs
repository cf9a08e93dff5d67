//! `folio serve`: the read api over documents and collections.
//!
//! # Structure
//!
//! | Module     | Purpose                                    |
//! |------------|--------------------------------------------|
//! | `router`   | Path/method dispatch, query decoding       |
//! | `handlers` | Endpoint implementations                   |
//! | `response` | Response construction, HEAD handling       |
//!
//! The server binds, registers itself for Ctrl+C shutdown, then hands each
//! incoming request to a small worker pool. Collections are fixed for the
//! process lifetime; documents are reloaded per request unless the cache is
//! enabled.

mod handlers;
mod response;
mod router;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Result, anyhow};
use crossbeam::channel::{Receiver, unbounded};
use tiny_http::{Request, Server};

use crate::collections::{PhotoStore, ProjectStore};
use crate::config::{SiteConfig, cfg};
use crate::contact::Mailer;
use crate::content::{ContentCache, NoteStore};
use crate::{debug, log};

/// How many consecutive ports to try when the requested one is taken.
const MAX_PORT_RETRIES: u16 = 10;

/// Everything a request handler needs, shared across the worker pool.
pub struct ServerState {
    pub config: Arc<SiteConfig>,
    pub cache: ContentCache,
    pub projects: ProjectStore,
    pub photos: PhotoStore,
    pub mailer: Mailer,
}

impl ServerState {
    fn from_config(config: Arc<SiteConfig>) -> Self {
        let store = NoteStore::from_config(&config);
        let cache = ContentCache::new(store, config.serve.cache);
        let projects = ProjectStore::from_config(&config);
        let photos = PhotoStore::from_config(&config);
        let mailer = Mailer::new(config.contact.clone());
        Self {
            config,
            cache,
            projects,
            photos,
            mailer,
        }
    }
}

/// A bound server that has not started accepting requests yet.
pub struct BoundServer {
    server: Arc<Server>,
    state: Arc<ServerState>,
    shutdown_rx: Receiver<()>,
}

/// Bind and serve until Ctrl+C.
pub fn run() -> Result<()> {
    bind_server()?.run()
}

/// Bind the configured interface/port and prepare shared state.
pub fn bind_server() -> Result<BoundServer> {
    let config = cfg();
    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = unbounded();
    crate::core::register_server(Arc::clone(&server), shutdown_tx);

    let state = Arc::new(ServerState::from_config(config));
    if state.config.serve.cache {
        debug!("serve"; "document cache enabled");
    }

    log!("serve"; "listening on http://{addr}");

    Ok(BoundServer {
        server,
        state,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Run the request loop until the server is unblocked.
    pub fn run(self) -> Result<()> {
        run_request_loop(&self.server, &self.state);

        // Distinguish Ctrl+C from the accept loop ending on its own
        if self.shutdown_rx.try_recv().is_ok() || crate::core::is_shutdown() {
            log!("serve"; "stopped");
        }
        Ok(())
    }
}

/// Bind to `base_port`, walking up through the next ports if it is taken.
fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                // With port 0 the OS picks; report what was actually bound
                let addr = server.server_addr().to_ip().unwrap_or(addr);
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < MAX_PORT_RETRIES => continue,
            Err(e) => {
                return Err(anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    MAX_PORT_RETRIES,
                    base_port,
                    base_port.saturating_add(MAX_PORT_RETRIES - 1),
                    e
                ));
            }
        }
    }
    unreachable!()
}

fn run_request_loop(server: &Server, state: &Arc<ServerState>) {
    // Small pool so one slow handler (mail relay) cannot stall the rest
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let state = Arc::clone(state);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &state) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

fn handle_request(request: Request, state: &ServerState) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::send(
            request,
            response::ApiResponse::error(503, "Service unavailable"),
        );
    }
    router::route(request, state)
}
