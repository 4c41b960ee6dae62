//! Hello MCP Server Library
//!
//! A small Model Context Protocol (MCP) server that exposes seven demo tools
//! over STDIO, TCP or stateless HTTP.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the tool registry, parameter schemas and tool definitions
//!
//! # Example
//!
//! ```rust,no_run
//! use hello_mcp_server::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     hello_mcp_server::serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result, serve};
pub use domains::tools::{ToolError, ToolRegistry};
