//! Welcome tool definition.
//!
//! A tool that greets the user by name.

use tracing::{info, instrument};

use crate::domains::tools::handlers::{InvocationResult, ToolDescriptor};
use crate::domains::tools::schema::{ParamType, ParameterSpec, ToolArguments};

/// Welcome tool - returns a friendly welcome message.
pub struct WelcomeTool;

impl WelcomeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "welcome";

    /// Human-readable title.
    pub const TITLE: &'static str = "Welcome a user";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Return a friendly welcome message for the user.";

    /// Declared parameters.
    pub fn parameters() -> Vec<ParameterSpec> {
        vec![ParameterSpec::required(
            "name",
            ParamType::String,
            "Name of the user",
        )]
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(args: &ToolArguments) -> InvocationResult {
        let name = args.str("name")?;
        info!("Welcome tool called for {}", name);
        Ok(welcome_message(name))
    }

    /// Build the registry descriptor for this tool.
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            Self::parameters(),
            Self::execute,
        )
    }
}

/// Format the greeting.
pub fn welcome_message(name: &str) -> String {
    format!("Welcome {name} from this amazing application!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::ParamValue;

    #[test]
    fn test_welcome_message() {
        assert_eq!(
            welcome_message("Ada"),
            "Welcome Ada from this amazing application!"
        );
    }

    #[test]
    fn test_welcome_execute() {
        let args = ToolArguments::new().with("name", ParamValue::String("Grace".to_string()));
        assert_eq!(
            WelcomeTool::execute(&args).unwrap(),
            "Welcome Grace from this amazing application!"
        );
    }
}
