//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol on top of the tool registry, and [`serve`], the explicit entry
//! point a binary or hosting layer calls to start serving.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and registered in [`ToolRegistry::with_defaults`]. The rmcp ToolRouter
//! (STDIO/TCP) and the HTTP handlers both dispatch through the registry.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error;
use super::transport::TransportService;
use crate::domains::tools::{InvocationRequest, ToolRegistry, build_tool_router, router};

/// Instructions sent to clients on initialization.
pub const INSTRUCTIONS: &str = "Demo MCP server with a greeting, a simulated weather forecast, \
     a calculator, a password generator, a text analyzer, a unit converter and server info.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. Cloning is
/// cheap: the configuration and registry are shared and read-only.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry every tool call is dispatched through.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls over rmcp transports.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the built-in tools.
    ///
    /// # Errors
    ///
    /// Fails if tool registration fails; the server must not start then.
    pub fn new(config: Config) -> error::Result<Self> {
        let config = Arc::new(config);
        let registry = ToolRegistry::with_defaults(config.clone())?;
        Ok(Self::with_registry(config, registry))
    }

    /// Create a server around an already-populated registry.
    pub fn with_registry(config: Arc<Config>, registry: ToolRegistry) -> Self {
        let registry = Arc::new(registry);
        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config,
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .to_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "title": t.title,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Bad requests (unknown tool, missing or invalid arguments) come back
    /// as `Err`; tool failures come back as a result flagged `isError`.
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, String> {
        let request = InvocationRequest::new(name, arguments);
        let result = router::into_call_result(self.registry.dispatch(&request))
            .map_err(|e| e.message.to_string())?;

        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Build the server and run the configured transport until it stops.
///
/// This is the single entry point for every deployment shape: the binary
/// calls it after setting up logging, and a hosting layer that has no
/// process entry point can call it directly.
///
/// # Errors
///
/// Returns an error if tool registration fails or the transport cannot
/// start (e.g. the port is already bound).
pub async fn serve(config: Config) -> error::Result<()> {
    info!("Starting {} v{}", config.server.name, config.server.version);

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config)?;
    info!("Server initialized with {} tools", server.registry().len());

    transport.run(server).await?;

    info!("Server shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_SERVER_NAME;
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    #[test]
    fn test_list_tools_includes_titles() {
        let tools = server().list_tools();
        assert_eq!(tools.len(), 7);
        let welcome = tools.iter().find(|t| t["name"] == "welcome").unwrap();
        assert_eq!(welcome["title"], "Welcome a user");
        assert_eq!(welcome["inputSchema"]["required"], json!(["name"]));
    }

    #[test]
    fn test_call_tool_success() {
        let result = server()
            .call_tool("calculate", json!({ "expression": "sqrt(16)" }))
            .unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["text"], "sqrt(16) = 4");
    }

    #[test]
    fn test_call_tool_validation_failure_is_a_result() {
        let result = server()
            .call_tool("generate_password", json!({ "length": 7 }))
            .unwrap();
        assert_eq!(result["isError"], true);
    }

    #[test]
    fn test_call_tool_unknown_is_an_error() {
        let err = server().call_tool("nope", json!({})).unwrap_err();
        assert!(err.contains("nope"));
    }

    #[test]
    fn test_get_info_enables_tools() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.instructions.as_deref(), Some(INSTRUCTIONS));
        assert_eq!(info.server_info.name, DEFAULT_SERVER_NAME);
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_get_info_reports_configured_name() {
        let mut config = Config::default();
        config.server.name = "Weather Demo".to_string();
        let info = McpServer::new(config).unwrap().get_info();
        assert_eq!(info.server_info.name, "Weather Demo");
    }

    #[test]
    fn test_server_is_shareable_across_threads() {
        let server = server();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let server = server.clone();
                std::thread::spawn(move || {
                    server
                        .call_tool("calculate", json!({ "expression": format!("{i} * 2") }))
                        .unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.join().unwrap();
            assert_eq!(result["content"][0]["text"], format!("{i} * 2 = {}", i * 2));
        }
    }
}
