//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod calculate;
pub mod password;
pub mod server_info;
pub mod text_analysis;
pub mod unit_convert;
pub mod weather;
pub mod welcome;

pub use calculate::CalculateTool;
pub use password::GeneratePasswordTool;
pub use server_info::{ServerInfoTool, ToolSummary};
pub use text_analysis::AnalyzeTextTool;
pub use unit_convert::ConvertUnitsTool;
pub use weather::GetWeatherTool;
pub use welcome::WelcomeTool;
