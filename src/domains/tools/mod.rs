//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are stateless functions that MCP clients invoke by name.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` - Parameter declarations, coercion and JSON Schema output
//! - `handlers.rs` - Tool descriptors and invocation types
//! - `registry.rs` - Central tool registry and dispatch
//! - `router.rs` - rmcp ToolRouter for STDIO/TCP, backed by the registry
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Declare its parameters, `execute()` and `descriptor()`
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `ToolRegistry::with_defaults`
//!
//! Both transports pick the tool up from the registry; nothing else changes.

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;
pub mod schema;

pub use error::ToolError;
pub use handlers::*;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
pub use schema::{ParamType, ParamValue, ParameterSpec, ToolArguments};
