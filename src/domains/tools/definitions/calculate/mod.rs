//! Calculator tool definition.
//!
//! Evaluates arithmetic with a dedicated parser; there is no general
//! `eval` behind it, so only the documented grammar can ever run.

pub mod parser;

use tracing::{info, instrument};

use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{InvocationResult, ToolDescriptor};
use crate::domains::tools::schema::{ParamType, ParameterSpec, ToolArguments};

pub use parser::{EvalError, Function, evaluate};

/// Calculator tool - evaluates a restricted arithmetic expression.
pub struct CalculateTool;

impl CalculateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calculate";

    /// Human-readable title.
    pub const TITLE: &'static str = "Calculator";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Evaluate a mathematical expression. Supports + - * / ^ (or **), \
         parentheses, the functions abs, round, min, max, sum, pow, sqrt, sin, cos, tan, log, \
         log10, exp and the constants pi and e.";

    /// Declared parameters.
    pub fn parameters() -> Vec<ParameterSpec> {
        vec![ParameterSpec::required(
            "expression",
            ParamType::String,
            "Mathematical expression to evaluate, e.g. '2 + 3 * 4' or 'sqrt(16)'",
        )]
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(args: &ToolArguments) -> InvocationResult {
        let expression = args.str("expression")?;
        info!("Calculate tool called for {:?}", expression);
        calculate(expression)
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

/// Evaluate `expression` and format the answer.
///
/// # Errors
///
/// Returns a validation error embedding the expression and the reason.
pub fn calculate(expression: &str) -> InvocationResult {
    match evaluate(expression) {
        Ok(value) => Ok(format!("{} = {}", expression.trim(), format_number(value))),
        Err(e) => Err(ToolError::validation(format!(
            "Error evaluating expression '{expression}': {e}"
        ))),
    }
}

/// Print integral values without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_formats_integers() {
        assert_eq!(calculate("2 + 3 * 4").unwrap(), "2 + 3 * 4 = 14");
        assert_eq!(calculate("sqrt(16)").unwrap(), "sqrt(16) = 4");
    }

    #[test]
    fn test_calculate_keeps_fractions() {
        assert_eq!(calculate("7 / 2").unwrap(), "7 / 2 = 3.5");
    }

    #[test]
    fn test_calculate_rejects_disallowed_names() {
        let err = calculate("import os").unwrap_err();
        let ToolError::Validation(message) = &err else {
            panic!("expected a validation error, got {err:?}");
        };
        assert!(message.contains("'import os'"));
        assert!(message.contains("not allowed"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }
}
