//! Transport configuration types.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;

#[cfg(feature = "http")]
use crate::core::error::Error;

#[cfg(any(feature = "tcp", feature = "http"))]
use crate::core::config::env_port;

/// Default HTTP port when neither `MCP_HTTP_PORT` nor `PORT` is set.
#[cfg(feature = "http")]
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default TCP port when `MCP_TCP_PORT` is not set.
#[cfg(feature = "tcp")]
pub const DEFAULT_TCP_PORT: u16 = 3000;

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// TCP socket transport with JSON-RPC messages.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// Stateless HTTP transport with JSON-RPC over POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// TCP transport configuration.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    #[allow(unreachable_code)]
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            return Self::Tcp(TcpConfig::default());
        }

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");
        }
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_TCP_PORT,
            host: default_host(),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create a TCP transport config.
    #[cfg(feature = "tcp")]
    pub fn tcp(port: u16, host: impl Into<String>) -> Self {
        Self::Tcp(TcpConfig {
            port,
            host: host.into(),
        })
    }

    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a port variable is not a valid port.
    pub fn from_env() -> Result<Self> {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        let config = match transport.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => {
                let port = env_port("MCP_TCP_PORT")?.unwrap_or(DEFAULT_TCP_PORT);
                let host = std::env::var("MCP_TCP_HOST").unwrap_or_else(|_| default_host());
                Self::Tcp(TcpConfig { port, host })
            }
            #[cfg(feature = "http")]
            "http" | "streamable-http" => Self::Http(HttpConfig::from_env()?),
            #[cfg(feature = "stdio")]
            _ => Self::Stdio,
            #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
            _ => Self::Tcp(TcpConfig::default()),
            #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
            _ => Self::Http(HttpConfig::from_env()?),
        };

        Ok(config)
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }

    /// The port this transport binds, if any.
    pub fn port(&self) -> Option<u16> {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => None,
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => Some(cfg.port),
            #[cfg(feature = "http")]
            Self::Http(cfg) => Some(cfg.port),
        }
    }

    /// Check if this transport is the standard STDIO mode.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Load HTTP settings from the environment.
    ///
    /// `MCP_HTTP_PORT` wins over `PORT`, which hosting platforms commonly set.
    pub fn from_env() -> Result<Self> {
        let port = match env_port("MCP_HTTP_PORT")? {
            Some(port) => port,
            None => env_port("PORT")?.unwrap_or(DEFAULT_HTTP_PORT),
        };
        let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
        let rpc_path = match std::env::var("MCP_HTTP_PATH") {
            Ok(raw) => rpc_path_from(&raw)?,
            Err(_) => default_rpc_path(),
        };
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        Ok(Self {
            port,
            host,
            rpc_path,
            enable_cors,
        })
    }
}

/// Normalize a configured JSON-RPC route.
///
/// A missing leading `/` is added. Empty paths and route captures or
/// wildcards (`{`, `}`, `*`) are configuration errors.
#[cfg(feature = "http")]
fn rpc_path_from(raw: &str) -> Result<String> {
    let path = raw.trim();
    if path.is_empty() || path == "/" {
        return Err(Error::config(format!(
            "MCP_HTTP_PATH={raw:?} must name a route other than the root"
        )));
    }
    if path.contains(['{', '}', '*']) || path.contains(char::is_whitespace) {
        return Err(Error::config(format!(
            "MCP_HTTP_PATH={raw:?} is not a plain route path"
        )));
    }
    Ok(if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "stdio")]
    #[test]
    fn test_stdio_has_no_port() {
        let config = TransportConfig::stdio();
        assert!(config.is_stdio());
        assert_eq!(config.port(), None);
        assert_eq!(config.description(), "STDIO (standard MCP mode)");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rpc_path, "/mcp");
        assert!(config.enable_cors);

        let transport = TransportConfig::http(9000, "0.0.0.0");
        assert_eq!(transport.port(), Some(9000));
        assert_eq!(transport.description(), "HTTP on 0.0.0.0:9000/mcp");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_port_falls_back_to_platform_port() {
        let _lock = crate::core::config::tests::ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("MCP_HTTP_PORT");
            std::env::set_var("PORT", "5055");
        }
        assert_eq!(HttpConfig::from_env().unwrap().port, 5055);

        unsafe {
            std::env::set_var("MCP_HTTP_PORT", "6066");
        }
        assert_eq!(HttpConfig::from_env().unwrap().port, 6066);

        unsafe {
            std::env::remove_var("MCP_HTTP_PORT");
            std::env::remove_var("PORT");
        }
        assert_eq!(HttpConfig::from_env().unwrap().port, DEFAULT_HTTP_PORT);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_rpc_path_normalization() {
        assert_eq!(rpc_path_from("mcp").unwrap(), "/mcp");
        assert_eq!(rpc_path_from(" /api/rpc ").unwrap(), "/api/rpc");
        assert!(matches!(rpc_path_from(""), Err(Error::Config(_))));
        assert!(matches!(rpc_path_from("/"), Err(Error::Config(_))));
        assert!(matches!(rpc_path_from("/{id}"), Err(Error::Config(_))));
        assert!(matches!(rpc_path_from("/a b"), Err(Error::Config(_))));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_path_from_env() {
        let _lock = crate::core::config::tests::ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_HTTP_PATH", "mcp");
        }
        assert_eq!(HttpConfig::from_env().unwrap().rpc_path, "/mcp");

        unsafe {
            std::env::set_var("MCP_HTTP_PATH", "/{*rest}");
        }
        assert!(matches!(HttpConfig::from_env(), Err(Error::Config(_))));

        unsafe {
            std::env::remove_var("MCP_HTTP_PATH");
        }
        assert_eq!(HttpConfig::from_env().unwrap().rpc_path, "/mcp");
    }

    #[cfg(feature = "tcp")]
    #[test]
    fn test_tcp_description() {
        let config = TransportConfig::tcp(3001, "127.0.0.1");
        assert_eq!(config.description(), "TCP on 127.0.0.1:3001");
        assert_eq!(config.port(), Some(3001));
    }
}
