//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur while registering or invoking tools.
///
/// The first five variants are per-call failures and are always contained
/// by [`ToolRegistry::dispatch`](super::ToolRegistry::dispatch). The last
/// two only occur at registration time and abort startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// A required parameter was not supplied and has no default.
    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),

    /// A parameter was supplied with an incompatible value, or is not
    /// declared by the tool at all.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The tool handler failed unexpectedly (including panics).
    #[error("Tool execution failed: {0}")]
    Handler(String),

    /// Domain-level rejection of otherwise well-typed input.
    #[error("{0}")]
    Validation(String),

    /// A tool with the same name is already registered.
    #[error("Tool '{0}' is already registered")]
    AlreadyRegistered(String),

    /// A tool declares an inconsistent parameter schema.
    #[error("Invalid schema for tool '{tool}': {reason}")]
    InvalidSchema { tool: String, reason: String },
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "missing parameter" error.
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Create a new "invalid parameter" error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a new handler error.
    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler(msg.into())
    }

    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new "already registered" error.
    pub fn already_registered(name: impl Into<String>) -> Self {
        Self::AlreadyRegistered(name.into())
    }

    /// Create a new "invalid schema" error.
    pub fn invalid_schema(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Whether the caller sent a bad request (as opposed to the tool failing).
    ///
    /// Transports answer these with a protocol-level invalid-params error;
    /// everything else becomes a tool result flagged as an error.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::MissingParameter(_) | Self::InvalidParameter { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_classification() {
        assert!(ToolError::not_found("nope").is_request_error());
        assert!(ToolError::missing_parameter("city").is_request_error());
        assert!(ToolError::invalid_parameter("days", "expected an integer").is_request_error());
        assert!(!ToolError::handler("boom").is_request_error());
        assert!(!ToolError::validation("too short").is_request_error());
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = ToolError::validation("Password length must be between 8 and 50 characters");
        assert_eq!(
            err.to_string(),
            "Password length must be between 8 and 50 characters"
        );
    }
}
