//! Parameter schemas and argument resolution.
//!
//! Every tool declares an ordered list of [`ParameterSpec`]s. Before a
//! handler runs, raw JSON arguments are resolved against that list into a
//! [`ToolArguments`] map of typed [`ParamValue`]s. The same specs are
//! rendered as JSON Schema for `tools/list` discovery.

use std::collections::{HashMap, HashSet};
use std::fmt;

use rmcp::model::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::error::ToolError;

/// Strings accepted as boolean `true`.
const TRUE_STRINGS: &[&str] = &["true", "yes", "on", "1"];

/// Strings accepted as boolean `false`.
const FALSE_STRINGS: &[&str] = &["false", "no", "off", "0"];

/// The type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Float,
    Boolean,
}

impl ParamType {
    /// The JSON Schema `type` keyword for this parameter type.
    pub fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A resolved, typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl ParamValue {
    /// The type of this value.
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::String(_) => ParamType::String,
            Self::Integer(_) => ParamType::Integer,
            Self::Float(_) => ParamType::Float,
            Self::Boolean(_) => ParamType::Boolean,
        }
    }

    /// Render this value as JSON (used for schema defaults).
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => json!(s),
            Self::Integer(i) => json!(i),
            Self::Float(f) => json!(f),
            Self::Boolean(b) => json!(b),
        }
    }
}

/// Declaration of a single tool parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub param_type: ParamType,
    pub required: bool,
    pub default: Option<ParamValue>,
    pub description: String,
}

impl ParameterSpec {
    /// Declare a required parameter.
    pub fn required(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: true,
            default: None,
            description: description.into(),
        }
    }

    /// Declare an optional parameter; its type is taken from the default.
    pub fn optional(
        name: impl Into<String>,
        default: ParamValue,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: default.param_type(),
            required: false,
            default: Some(default),
            description: description.into(),
        }
    }

    /// Check the declaration invariant: optional parameters carry a
    /// default of the declared type.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("parameter name must not be empty".to_string());
        }
        match (&self.default, self.required) {
            (None, false) => Err(format!(
                "optional parameter '{}' has no default",
                self.name
            )),
            (Some(default), _) if default.param_type() != self.param_type => Err(format!(
                "default for '{}' is a {}, expected {}",
                self.name,
                default.param_type(),
                self.param_type
            )),
            _ => Ok(()),
        }
    }

    /// Coerce a raw JSON value into this parameter's type.
    ///
    /// Returns a human-readable reason on failure.
    pub fn coerce(&self, raw: &Value) -> Result<ParamValue, String> {
        match self.param_type {
            ParamType::String => match raw {
                Value::String(s) => Ok(ParamValue::String(s.clone())),
                other => Err(format!("expected a string, got {}", json_kind(other))),
            },
            ParamType::Integer => coerce_integer(raw).map(ParamValue::Integer),
            ParamType::Float => coerce_float(raw).map(ParamValue::Float),
            ParamType::Boolean => coerce_boolean(raw).map(ParamValue::Boolean),
        }
    }

    /// Render this parameter as a JSON Schema property.
    pub fn to_json_schema(&self) -> Value {
        let mut property = json!({
            "type": self.param_type.json_type(),
            "description": self.description,
        });
        if let Some(default) = &self.default {
            property["default"] = default.to_json();
        }
        property
    }
}

fn coerce_integer(raw: &Value) -> Result<i64, String> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(format!("expected an integer, got {n}")),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("expected an integer, got \"{s}\"")),
        other => Err(format!("expected an integer, got {}", json_kind(other))),
    }
}

fn coerce_float(raw: &Value) -> Result<f64, String> {
    match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("expected a number, got {n}")),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(f),
            _ => Err(format!("expected a number, got \"{s}\"")),
        },
        other => Err(format!("expected a number, got {}", json_kind(other))),
    }
}

fn coerce_boolean(raw: &Value) -> Result<bool, String> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(format!("expected a boolean, got {n}")),
        },
        Value::String(s) => {
            let lowered = s.trim().to_lowercase();
            if TRUE_STRINGS.contains(&lowered.as_str()) {
                Ok(true)
            } else if FALSE_STRINGS.contains(&lowered.as_str()) {
                Ok(false)
            } else {
                Err(format!("expected a boolean, got \"{s}\""))
            }
        }
        other => Err(format!("expected a boolean, got {}", json_kind(other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Validate a whole parameter list for a tool.
pub fn validate_parameters(tool: &str, params: &[ParameterSpec]) -> Result<(), ToolError> {
    let mut seen = HashSet::new();
    for param in params {
        param
            .validate()
            .map_err(|reason| ToolError::invalid_schema(tool, reason))?;
        if !seen.insert(param.name.as_str()) {
            return Err(ToolError::invalid_schema(
                tool,
                format!("parameter '{}' is declared twice", param.name),
            ));
        }
    }
    Ok(())
}

/// Build the JSON Schema `inputSchema` object for a parameter list.
///
/// Undeclared arguments are rejected at dispatch, hence
/// `additionalProperties: false`.
pub fn input_schema(params: &[ParameterSpec]) -> JsonObject {
    let properties: serde_json::Map<String, Value> = params
        .iter()
        .map(|p| (p.name.clone(), p.to_json_schema()))
        .collect();
    let required: Vec<&str> = params
        .iter()
        .filter(|p| p.required)
        .map(|p| p.name.as_str())
        .collect();

    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    schema.insert("required".to_string(), json!(required));
    schema.insert("additionalProperties".to_string(), json!(false));
    schema
}

/// Resolve raw arguments against a parameter list.
///
/// JSON `null` counts as "not provided". Arguments not declared by the
/// schema are rejected.
pub fn resolve_arguments(
    params: &[ParameterSpec],
    raw: &JsonObject,
) -> Result<ToolArguments, ToolError> {
    if let Some(extra) = raw
        .keys()
        .find(|key| !params.iter().any(|p| &p.name == *key))
    {
        return Err(ToolError::invalid_parameter(
            extra.as_str(),
            "not a parameter of this tool",
        ));
    }

    let mut resolved = ToolArguments::new();
    for param in params {
        let value = match raw.get(&param.name) {
            Some(value) if !value.is_null() => param
                .coerce(value)
                .map_err(|reason| ToolError::invalid_parameter(param.name.as_str(), reason))?,
            _ => match (&param.default, param.required) {
                (Some(default), false) => default.clone(),
                _ => return Err(ToolError::missing_parameter(param.name.as_str())),
            },
        };
        resolved.values.insert(param.name.clone(), value);
    }
    Ok(resolved)
}

/// Typed arguments handed to a tool handler after resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: HashMap<String, ParamValue>,
}

impl ToolArguments {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, builder-style.
    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Look up a raw resolved value.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Number of resolved arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no arguments were resolved.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn str(&self, name: &str) -> Result<&str, ToolError> {
        match self.get(name) {
            Some(ParamValue::String(s)) => Ok(s),
            other => Err(mismatch(name, ParamType::String, other)),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64, ToolError> {
        match self.get(name) {
            Some(ParamValue::Integer(i)) => Ok(*i),
            other => Err(mismatch(name, ParamType::Integer, other)),
        }
    }

    pub fn float(&self, name: &str) -> Result<f64, ToolError> {
        match self.get(name) {
            Some(ParamValue::Float(f)) => Ok(*f),
            Some(ParamValue::Integer(i)) => Ok(*i as f64),
            other => Err(mismatch(name, ParamType::Float, other)),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool, ToolError> {
        match self.get(name) {
            Some(ParamValue::Boolean(b)) => Ok(*b),
            other => Err(mismatch(name, ParamType::Boolean, other)),
        }
    }
}

fn mismatch(name: &str, expected: ParamType, found: Option<&ParamValue>) -> ToolError {
    match found {
        Some(value) => ToolError::handler(format!(
            "argument '{name}' resolved as {}, handler expected {expected}",
            value.param_type()
        )),
        None => ToolError::handler(format!("argument '{name}' was not resolved")),
    }
}
