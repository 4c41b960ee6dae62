//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every route forwards to [`ToolRegistry::dispatch`], so STDIO/TCP calls go
//! through exactly the same validation and error containment as HTTP calls.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::{CallToolResult, Content, Tool},
};

use super::error::ToolError;
use super::handlers::{InvocationRequest, InvocationResult};
use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .descriptors()
        .map(|descriptor| create_route(registry.clone(), descriptor.to_tool()))
        .fold(ToolRouter::new(), |router, route| router.with_route(route))
}

/// Create a ToolRoute that dispatches `tool` through the registry.
fn create_route<S>(registry: Arc<ToolRegistry>, tool: Tool) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = tool.name.to_string();
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let request = InvocationRequest {
            tool_name: name.clone(),
            arguments: ctx.arguments.clone().unwrap_or_default(),
        };
        let registry = registry.clone();
        async move { into_call_result(registry.dispatch(&request)) }.boxed()
    })
}

/// Map a dispatch outcome onto the MCP result model.
///
/// Bad requests become protocol errors; tool failures become error results
/// the model can read and react to.
pub fn into_call_result(result: InvocationResult) -> Result<CallToolResult, McpError> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) if e.is_request_error() => Err(request_error(&e)),
        Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
}

fn request_error(error: &ToolError) -> McpError {
    McpError::invalid_params(error.to_string(), None)
}
