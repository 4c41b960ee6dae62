//! STDIO transport implementation.
//!
//! The default MCP mode: one client speaks JSON-RPC over stdin/stdout.
//! Logs go to stderr so stdout carries nothing but protocol frames.

use rmcp::ServiceExt;
use tracing::{debug, info};

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve a single client until it closes stdin.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let name = server.name().to_string();
        info!("{} ready on stdin/stdout", name);

        let running = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(format!("stdio handshake failed: {e}")))?;
        debug!("stdio client initialized");

        let reason = running
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;

        info!("{} stdio session ended: {:?}", name, reason);
        Ok(())
    }
}
