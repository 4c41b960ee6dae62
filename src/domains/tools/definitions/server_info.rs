//! Server info tool definition.
//!
//! Reports the running configuration and the fixed tool list.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use crate::core::config::Config;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{InvocationResult, ToolDescriptor};
use crate::domains::tools::schema::{ParameterSpec, ToolArguments};

/// Name and title of one registered tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSummary {
    pub name: String,
    pub title: String,
}

impl ToolSummary {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ServerSummary<'a> {
    server: &'a str,
    version: &'a str,
    transport: String,
    port: Option<u16>,
    tools: &'a [ToolSummary],
}

/// Server info tool.
pub struct ServerInfoTool;

impl ServerInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "server_info";

    /// Human-readable title.
    pub const TITLE: &'static str = "Server information";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Describe this server: name, version, transport, port and available tools.";

    pub fn parameters() -> Vec<ParameterSpec> {
        Vec::new()
    }

    /// Build the registry descriptor; the summary is fixed at startup.
    pub fn descriptor(config: Arc<Config>, tools: Vec<ToolSummary>) -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            Self::parameters(),
            move |args: &ToolArguments| Self::execute(args, &config, &tools),
        )
    }

    #[instrument(skip_all)]
    pub fn execute(_args: &ToolArguments, config: &Config, tools: &[ToolSummary]) -> InvocationResult {
        info!("Server info tool called");
        server_summary(config, tools)
    }
}

/// Render the configuration and tool list as pretty JSON.
pub fn server_summary(config: &Config, tools: &[ToolSummary]) -> InvocationResult {
    let summary = ServerSummary {
        server: &config.server.name,
        version: &config.server.version,
        transport: config.transport.description(),
        port: config.port(),
        tools,
    };
    serde_json::to_string_pretty(&summary).map_err(|e| ToolError::handler(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_tools() {
        let config = Config::default();
        let tools = vec![
            ToolSummary::new("welcome", "Welcome a user"),
            ToolSummary::new("server_info", "Server information"),
        ];
        let text = server_summary(&config, &tools).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["server"], config.server.name.as_str());
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(value["tools"][0]["name"], "welcome");
        assert_eq!(value["tools"][1]["title"], "Server information");
        assert_eq!(value["tools"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_descriptor_has_no_parameters() {
        let descriptor = ServerInfoTool::descriptor(Arc::new(Config::default()), Vec::new());
        assert!(descriptor.parameters().is_empty());
        assert!(descriptor.invoke(&ToolArguments::new()).is_ok());
    }
}
