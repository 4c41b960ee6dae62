//! TCP transport implementation.
//!
//! Newline-delimited JSON-RPC over plain sockets. Each accepted connection
//! runs its own MCP session on a spawned task; every session shares the
//! same read-only tool registry, so a slow or broken client never blocks
//! the others.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{Duration, sleep};
use tracing::{Instrument, debug, info, info_span, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Pause after a failed `accept` (e.g. file descriptors exhausted).
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// The `host:port` this transport binds.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Bind the configured address and serve clients until the process stops.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("{} listening on {} (JSON-RPC over TCP)", server.name(), addr);
        Self::accept_loop(listener, server).await
    }

    /// Accept connections from an already-bound listener.
    pub async fn accept_loop(listener: TcpListener, server: McpServer) -> TransportResult<()> {
        let active = Arc::new(AtomicUsize::new(0));

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("accept failed: {}", e);
                    sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };

            if let Err(e) = stream.set_nodelay(true) {
                debug!("TCP_NODELAY not set for {}: {}", peer, e);
            }

            let sessions = active.fetch_add(1, Ordering::Relaxed) + 1;
            info!(%peer, sessions, "client connected");

            let server = server.clone();
            let active = active.clone();
            tokio::spawn(
                async move {
                    Self::serve_client(server, stream, peer).await;
                    let remaining = active.fetch_sub(1, Ordering::Relaxed) - 1;
                    info!(sessions = remaining, "client disconnected");
                }
                .instrument(info_span!("tcp_session", %peer)),
            );
        }
    }

    /// Run one MCP session until the peer hangs up.
    async fn serve_client(server: McpServer, stream: TcpStream, peer: SocketAddr) {
        let session = match server.serve(stream).await {
            Ok(session) => session,
            Err(e) => {
                warn!("handshake with {} failed: {}", peer, e);
                return;
            }
        };

        match session.waiting().await {
            Ok(reason) => debug!("session with {} ended: {:?}", peer, reason),
            Err(e) => warn!("session with {} aborted: {}", peer, e),
        }
    }
}
