//! Unit converter tool definition.
//!
//! Each supported direction has its own formula; pairs are not inverted
//! automatically.

use std::collections::BTreeSet;

use tracing::{info, instrument};

use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{InvocationResult, ToolDescriptor};
use crate::domains::tools::schema::{ParamType, ParameterSpec, ToolArguments};

/// A single directed conversion.
pub struct Conversion {
    pub from: &'static str,
    pub to: &'static str,
    pub convert: fn(f64) -> f64,
}

/// Every supported (from, to) pair.
pub const CONVERSIONS: &[Conversion] = &[
    Conversion { from: "celsius", to: "fahrenheit", convert: |c| c * 9.0 / 5.0 + 32.0 },
    Conversion { from: "fahrenheit", to: "celsius", convert: |f| (f - 32.0) * 5.0 / 9.0 },
    Conversion { from: "celsius", to: "kelvin", convert: |c| c + 273.15 },
    Conversion { from: "kelvin", to: "celsius", convert: |k| k - 273.15 },
    Conversion { from: "meters", to: "feet", convert: |m| m * 3.28084 },
    Conversion { from: "feet", to: "meters", convert: |ft| ft * 0.3048 },
    Conversion { from: "meters", to: "inches", convert: |m| m * 39.3701 },
    Conversion { from: "inches", to: "meters", convert: |inch| inch * 0.0254 },
    Conversion { from: "kilometers", to: "miles", convert: |km| km * 0.621371 },
    Conversion { from: "miles", to: "kilometers", convert: |mi| mi * 1.60934 },
    Conversion { from: "kg", to: "pounds", convert: |kg| kg * 2.20462 },
    Conversion { from: "pounds", to: "kg", convert: |lb| lb * 0.453592 },
    Conversion { from: "grams", to: "ounces", convert: |g| g * 0.035274 },
    Conversion { from: "ounces", to: "grams", convert: |oz| oz * 28.3495 },
];

/// Sorted, de-duplicated list of every unit name.
pub fn supported_units() -> Vec<&'static str> {
    CONVERSIONS
        .iter()
        .flat_map(|c| [c.from, c.to])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Unit converter tool.
pub struct ConvertUnitsTool;

impl ConvertUnitsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "convert_units";

    /// Human-readable title.
    pub const TITLE: &'static str = "Convert units";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Convert a value between units of temperature \
         (celsius, fahrenheit, kelvin), length (meters, feet, inches, kilometers, miles) \
         and weight (kg, pounds, grams, ounces).";

    /// Declared parameters.
    pub fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::required("value", ParamType::Float, "Value to convert"),
            ParameterSpec::required("from_unit", ParamType::String, "Unit to convert from"),
            ParameterSpec::required("to_unit", ParamType::String, "Unit to convert to"),
        ]
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(args: &ToolArguments) -> InvocationResult {
        let value = args.float("value")?;
        let from_unit = args.str("from_unit")?;
        let to_unit = args.str("to_unit")?;
        info!("Convert units tool called: {} {} -> {}", value, from_unit, to_unit);
        convert_units(value, from_unit, to_unit)
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

/// Convert `value` and format it to four decimals with the target unit.
///
/// # Errors
///
/// An unsupported pair yields a validation error listing the supported units.
pub fn convert_units(value: f64, from_unit: &str, to_unit: &str) -> InvocationResult {
    let from = from_unit.trim().to_lowercase();
    let to = to_unit.trim().to_lowercase();

    match CONVERSIONS.iter().find(|c| c.from == from && c.to == to) {
        Some(conversion) => Ok(format!(
            "{value} {from} = {:.4} {to}",
            (conversion.convert)(value)
        )),
        None => Err(ToolError::validation(format!(
            "Conversion from '{from_unit}' to '{to_unit}' is not supported. Supported units: {}",
            supported_units().join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature() {
        assert_eq!(
            convert_units(0.0, "celsius", "fahrenheit").unwrap(),
            "0 celsius = 32.0000 fahrenheit"
        );
        assert_eq!(
            convert_units(100.0, "celsius", "fahrenheit").unwrap(),
            "100 celsius = 212.0000 fahrenheit"
        );
        assert_eq!(
            convert_units(0.0, "Celsius", "KELVIN").unwrap(),
            "0 celsius = 273.1500 kelvin"
        );
    }

    #[test]
    fn test_each_direction_has_its_own_formula() {
        assert_eq!(
            convert_units(1.0, "feet", "meters").unwrap(),
            "1 feet = 0.3048 meters"
        );
        assert_eq!(
            convert_units(1.0, "meters", "feet").unwrap(),
            "1 meters = 3.2808 feet"
        );
        assert_eq!(
            convert_units(2.0, "kg", "pounds").unwrap(),
            "2 kg = 4.4092 pounds"
        );
    }

    #[test]
    fn test_unsupported_pair_lists_units() {
        let err = convert_units(1.0, "celsius", "miles").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("not supported"));
        assert!(message.contains(&supported_units().join(", ")));
    }

    #[test]
    fn test_supported_units_sorted_and_unique() {
        let units = supported_units();
        assert_eq!(units.len(), 12);
        let mut sorted = units.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(units, sorted);
        assert_eq!(units.first(), Some(&"celsius"));
    }

    #[test]
    fn test_every_pair_is_directed() {
        assert_eq!(CONVERSIONS.len(), 14);
        for c in CONVERSIONS {
            assert!(convert_units(1.0, c.from, c.to).is_ok());
        }
    }
}
