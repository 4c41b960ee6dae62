//! Transport selection: hands the server to whichever transport the
//! configuration names.

use tracing::info;

use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "tcp")]
use super::tcp::TcpTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

/// Runs an [`McpServer`] on the configured transport.
#[derive(Debug, Clone)]
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Serve until the transport stops: stdin closes for STDIO, or the
    /// listener fails for TCP and HTTP.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!(
            tools = server.registry().len(),
            "Serving {} over {}",
            server.name(),
            self.config.description()
        );

        match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(server).await,
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(cfg) => TcpTransport::new(cfg).run(server).await,
            #[cfg(feature = "http")]
            TransportConfig::Http(cfg) => HttpTransport::new(cfg).run(server).await,
        }
    }
}
