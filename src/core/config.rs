//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults. Configuration is read once at startup and is read-only
//! afterwards.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default server name reported to clients.
pub const DEFAULT_SERVER_NAME: &str = "Hello MCP Server";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: DEFAULT_SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_TRANSPORT`.
    /// The HTTP port additionally honours the platform-standard `PORT`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a port variable is set but is not a
    /// valid port number.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env()?;
        info!("Transport configured: {}", config.transport.description());

        Ok(config)
    }

    /// The port the server listens on, if the transport binds one.
    pub fn port(&self) -> Option<u16> {
        self.transport.port()
    }
}

/// Read an optional port number from the environment.
///
/// Unset variables yield `Ok(None)`; set but unparsable values are a
/// configuration error.
pub(crate) fn env_port(var: &str) -> Result<Option<u16>> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|e| Error::config(format!("{var}={raw:?} is not a valid port: {e}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-global; tests touching them run serially.
    pub(crate) static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.name, DEFAULT_SERVER_NAME);
        assert_eq!(config.server.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_server_name_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "Weather Demo");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.server.name, "Weather Demo");
        unsafe {
            std::env::remove_var("MCP_SERVER_NAME");
        }
    }

    #[test]
    fn test_env_port_parsing() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TEST_PORT", "9090");
        }
        assert_eq!(env_port("MCP_TEST_PORT").unwrap(), Some(9090));

        unsafe {
            std::env::set_var("MCP_TEST_PORT", "not-a-port");
        }
        assert!(matches!(env_port("MCP_TEST_PORT"), Err(Error::Config(_))));

        unsafe {
            std::env::remove_var("MCP_TEST_PORT");
        }
        assert_eq!(env_port("MCP_TEST_PORT").unwrap(), None);
    }
}
