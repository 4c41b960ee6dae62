//! Tool descriptors and invocation types.
//!
//! A [`ToolDescriptor`] bundles everything the registry knows about a tool:
//! its name, human-readable title, description, parameter schema and the
//! handler that runs it. Descriptors are built once at startup and never
//! change afterwards.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::error::ToolError;
use super::schema::{ParameterSpec, ToolArguments, input_schema};

/// Outcome of a tool invocation: the textual payload, or a contained error.
pub type InvocationResult = Result<String, ToolError>;

/// A tool handler: a pure function over resolved arguments.
pub type ToolHandler = Arc<dyn Fn(&ToolArguments) -> InvocationResult + Send + Sync>;

/// An inbound request to run a tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// The name of the tool to execute.
    pub tool_name: String,

    /// Raw, unvalidated arguments keyed by parameter name.
    #[serde(default)]
    pub arguments: JsonObject,
}

impl InvocationRequest {
    /// Create a request from a tool name and a JSON value.
    ///
    /// Anything other than a JSON object is treated as "no arguments".
    pub fn new(tool_name: impl Into<String>, arguments: serde_json::Value) -> Self {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            _ => JsonObject::new(),
        };
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }
}

/// Everything the registry knows about one tool.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: String,
    title: String,
    description: String,
    parameters: Vec<ParameterSpec>,
    handler: ToolHandler,
}

impl ToolDescriptor {
    /// Create a new descriptor.
    pub fn new<F>(
        name: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        parameters: Vec<ParameterSpec>,
        handler: F,
    ) -> Self
    where
        F: Fn(&ToolArguments) -> InvocationResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            title: title.into(),
            description: description.into(),
            parameters,
            handler: Arc::new(handler),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Run the handler, containing both returned errors and panics.
    pub fn invoke(&self, args: &ToolArguments) -> InvocationResult {
        match catch_unwind(AssertUnwindSafe(|| (self.handler)(args))) {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => {
                warn!("Tool {} returned an error: {}", self.name, e);
                Err(e)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Tool {} panicked: {}", self.name, message);
                Err(ToolError::handler(message))
            }
        }
    }

    /// Create a Tool model for this descriptor (discovery metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.description.clone().into()),
            input_schema: Arc::new(input_schema(&self.parameters)),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(self.title.clone()),
        }
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::{ParamType, ParamValue};

    fn echo() -> ToolDescriptor {
        ToolDescriptor::new(
            "echo",
            "Echo",
            "Echo the input back",
            vec![ParameterSpec::required("text", ParamType::String, "Text")],
            |args| Ok(args.str("text")?.to_string()),
        )
    }

    #[test]
    fn test_invoke_success() {
        let args = ToolArguments::new().with("text", ParamValue::String("hi".to_string()));
        assert_eq!(echo().invoke(&args), Ok("hi".to_string()));
    }

    #[test]
    fn test_invoke_contains_panics() {
        let descriptor = ToolDescriptor::new("boom", "Boom", "Always panics", vec![], |_| {
            panic!("kaboom")
        });
        let err = descriptor.invoke(&ToolArguments::new()).unwrap_err();
        assert_eq!(err, ToolError::handler("kaboom"));
    }

    #[test]
    fn test_to_tool_carries_title_and_schema() {
        let tool = echo().to_tool();
        assert_eq!(tool.name, "echo");
        assert_eq!(tool.title.as_deref(), Some("Echo"));
        assert_eq!(tool.input_schema["required"], serde_json::json!(["text"]));
    }

    #[test]
    fn test_request_from_non_object() {
        let request = InvocationRequest::new("echo", serde_json::Value::Null);
        assert!(request.arguments.is_empty());
    }
}
