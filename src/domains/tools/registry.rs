//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - Ordered, name-unique registration of [`ToolDescriptor`]s
//! - Tool metadata for `tools/list`
//! - [`ToolRegistry::dispatch`], the single invocation path used by every
//!   transport

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;
use tracing::{debug, info, instrument, warn};

use crate::core::config::Config;

use super::definitions::{
    AnalyzeTextTool, CalculateTool, ConvertUnitsTool, GeneratePasswordTool, GetWeatherTool,
    ServerInfoTool, ToolSummary, WelcomeTool,
};
use super::error::ToolError;
use super::handlers::{InvocationRequest, InvocationResult, ToolDescriptor};
use super::schema::{resolve_arguments, validate_parameters};

/// Tool registry - holds every tool the server exposes.
///
/// Registration happens once at startup; afterwards the registry is only
/// read, so it can be shared behind an `Arc` and dispatched concurrently.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in demo tools.
    ///
    /// # Errors
    ///
    /// Fails if any built-in tool is misdeclared; this aborts startup.
    pub fn with_defaults(config: Arc<Config>) -> Result<Self, ToolError> {
        let mut registry = Self::new();
        registry.register(WelcomeTool::descriptor())?;
        registry.register(GetWeatherTool::descriptor())?;
        registry.register(CalculateTool::descriptor())?;
        registry.register(GeneratePasswordTool::descriptor())?;
        registry.register(AnalyzeTextTool::descriptor())?;
        registry.register(ConvertUnitsTool::descriptor())?;

        let mut catalog: Vec<ToolSummary> = registry
            .descriptors()
            .map(|d| ToolSummary::new(d.name(), d.title()))
            .collect();
        catalog.push(ToolSummary::new(ServerInfoTool::NAME, ServerInfoTool::TITLE));
        registry.register(ServerInfoTool::descriptor(config, catalog))?;

        info!("Registered {} tools", registry.len());
        Ok(registry)
    }

    /// Register a tool under its name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::AlreadyRegistered`] for a duplicate name and
    /// [`ToolError::InvalidSchema`] for an inconsistent parameter list.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), ToolError> {
        if self.index.contains_key(descriptor.name()) {
            return Err(ToolError::already_registered(descriptor.name()));
        }
        validate_parameters(descriptor.name(), descriptor.parameters())?;

        debug!("Registering tool: {}", descriptor.name());
        self.index
            .insert(descriptor.name().to_string(), self.tools.len());
        self.tools.push(descriptor);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// All tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// All descriptors, in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// Both HTTP and STDIO/TCP transports list tools through this.
    pub fn to_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDescriptor::to_tool).collect()
    }

    /// Resolve, validate and run a tool.
    ///
    /// Never panics and never propagates a handler failure: every error is
    /// returned as the `Err` side of the result.
    #[instrument(skip_all, fields(tool = %request.tool_name))]
    pub fn dispatch(&self, request: &InvocationRequest) -> InvocationResult {
        let Some(descriptor) = self.get(&request.tool_name) else {
            warn!("Unknown tool requested: {}", request.tool_name);
            return Err(ToolError::not_found(&request.tool_name));
        };

        let args = resolve_arguments(descriptor.parameters(), &request.arguments).inspect_err(
            |e| warn!("Rejected arguments for {}: {}", request.tool_name, e),
        )?;

        debug!("Invoking {} with {} arguments", descriptor.name(), args.len());
        descriptor.invoke(&args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::{ParamType, ParamValue, ParameterSpec};
    use serde_json::json;

    fn defaults() -> ToolRegistry {
        ToolRegistry::with_defaults(Arc::new(Config::default())).unwrap()
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = defaults();
        assert_eq!(
            registry.names(),
            vec![
                "welcome",
                "get_weather",
                "calculate",
                "generate_password",
                "analyze_text",
                "convert_units",
                "server_info",
            ]
        );
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = defaults();
        let err = registry.register(WelcomeTool::descriptor()).unwrap_err();
        assert_eq!(err, ToolError::already_registered("welcome"));
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_invalid_schema_registration_fails() {
        let mut registry = ToolRegistry::new();
        let broken = ToolDescriptor::new(
            "broken",
            "Broken",
            "Optional parameter without default",
            vec![ParameterSpec {
                name: "flag".to_string(),
                param_type: ParamType::Boolean,
                required: false,
                default: None,
                description: String::new(),
            }],
            |_| Ok(String::new()),
        );
        assert!(matches!(
            registry.register(broken),
            Err(ToolError::InvalidSchema { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_dispatch_unknown_tool() {
        let result = defaults().dispatch(&InvocationRequest::new("unknown", json!({})));
        assert_eq!(result, Err(ToolError::not_found("unknown")));
    }

    #[test]
    fn test_dispatch_every_tool_succeeds() {
        let registry = defaults();
        let calls = [
            ("welcome", json!({ "name": "Ada" })),
            ("get_weather", json!({ "city": "Paris" })),
            ("calculate", json!({ "expression": "2 + 3 * 4" })),
            ("generate_password", json!({})),
            ("analyze_text", json!({ "text": "Hello world. Bye!" })),
            (
                "convert_units",
                json!({ "value": 0, "from_unit": "celsius", "to_unit": "fahrenheit" }),
            ),
            ("server_info", json!({})),
        ];
        assert_eq!(calls.len(), registry.len());
        for (name, args) in calls {
            let result = registry.dispatch(&InvocationRequest::new(name, args));
            assert!(result.is_ok(), "{name} failed: {result:?}");
        }
    }

    #[test]
    fn test_dispatch_missing_parameter() {
        let result = defaults().dispatch(&InvocationRequest::new("welcome", json!({})));
        assert_eq!(result, Err(ToolError::missing_parameter("name")));
    }

    #[test]
    fn test_dispatch_rejects_extra_argument() {
        let result = defaults().dispatch(&InvocationRequest::new(
            "welcome",
            json!({ "name": "Ada", "shout": true }),
        ));
        assert!(matches!(result, Err(ToolError::InvalidParameter { .. })));
    }

    #[test]
    fn test_dispatch_coerces_arguments() {
        let result = defaults().dispatch(&InvocationRequest::new(
            "generate_password",
            json!({ "length": "20", "include_symbols": "false" }),
        ));
        let output = result.unwrap();
        assert!(output.contains("20 characters"));
    }

    #[test]
    fn test_dispatch_contains_handler_panic() {
        let mut registry = ToolRegistry::new();
        registry
            .register(ToolDescriptor::new(
                "fragile",
                "Fragile",
                "Panics on purpose",
                vec![ParameterSpec::optional("n", ParamValue::Integer(0), "")],
                |_| panic!("index out of bounds"),
            ))
            .unwrap();

        let result = registry.dispatch(&InvocationRequest::new("fragile", json!({})));
        assert_eq!(result, Err(ToolError::handler("index out of bounds")));

        // The registry keeps serving after a contained panic.
        assert!(registry
            .dispatch(&InvocationRequest::new("fragile", json!({ "n": 1 })))
            .is_err());
    }

    #[test]
    fn test_to_tools_matches_names() {
        let registry = defaults();
        let tools = registry.to_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, registry.names());
        assert!(tools.iter().all(|t| t.title.is_some()));
    }
}
