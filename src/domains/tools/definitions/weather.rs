//! Weather forecast tool definition.
//!
//! Produces a simulated multi-day forecast. There is no real data source:
//! every call draws fresh numbers from a non-cryptographic generator, so
//! output is advisory demo data and not reproducible.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use tracing::{info, instrument};

use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{InvocationResult, ToolDescriptor};
use crate::domains::tools::schema::{ParamType, ParamValue, ParameterSpec, ToolArguments};

/// Longest forecast the tool produces; larger requests are clamped.
pub const MAX_FORECAST_DAYS: i64 = 7;

/// Default number of days when the caller does not say.
pub const DEFAULT_FORECAST_DAYS: i64 = 3;

/// Sky conditions a day is sampled from.
pub const CONDITIONS: [&str; 7] = [
    "Sunny",
    "Partly cloudy",
    "Cloudy",
    "Light rain",
    "Heavy rain",
    "Thunderstorms",
    "Windy",
];

/// One day of a forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub label: String,
    pub condition: &'static str,
    pub high_c: i32,
    pub low_c: i32,
    pub humidity: u32,
}

/// A full forecast for a city.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub city: String,
    pub days: Vec<DailyForecast>,
}

impl Forecast {
    /// Render the forecast as text.
    pub fn render(&self) -> String {
        let mut out = format!(
            "Weather forecast for {} ({} day{}):\n",
            self.city,
            self.days.len(),
            if self.days.len() == 1 { "" } else { "s" }
        );
        for day in &self.days {
            out.push_str(&format!(
                "\n{}: {}, high {}°C / low {}°C, humidity {}%",
                day.label, day.condition, day.high_c, day.low_c, day.humidity
            ));
        }
        out.push_str("\n\nNote: simulated data for demonstration purposes.");
        out
    }
}

/// Weather tool - returns a simulated forecast for a city.
pub struct GetWeatherTool;

impl GetWeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_weather";

    /// Human-readable title.
    pub const TITLE: &'static str = "Get weather forecast";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a simulated weather forecast for a city (up to 7 days).";

    /// Declared parameters.
    pub fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::required("city", ParamType::String, "Name of the city"),
            ParameterSpec::optional(
                "days",
                ParamValue::Integer(DEFAULT_FORECAST_DAYS),
                "Number of days to forecast (1-7, larger values are capped at 7)",
            ),
        ]
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(args: &ToolArguments) -> InvocationResult {
        let city = args.str("city")?;
        let days = args.integer("days")?;
        info!("Weather tool called for {} ({} days)", city, days);

        let mut rng = fastrand::Rng::new();
        let forecast = generate_forecast(city, days, Local::now().date_naive(), &mut rng)?;
        Ok(forecast.render())
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

/// Generate `min(days, 7)` days of simulated weather starting at `today`.
///
/// # Errors
///
/// Returns a validation error when `days` is less than 1.
pub fn generate_forecast(
    city: &str,
    days: i64,
    today: NaiveDate,
    rng: &mut fastrand::Rng,
) -> Result<Forecast, ToolError> {
    if days < 1 {
        return Err(ToolError::validation(format!(
            "Number of days must be at least 1 (got {days})"
        )));
    }

    let days = (0..days.min(MAX_FORECAST_DAYS))
        .map(|offset| {
            let high_c = rng.i32(15..=35);
            DailyForecast {
                label: day_label(today, offset),
                condition: CONDITIONS[rng.usize(..CONDITIONS.len())],
                high_c,
                low_c: rng.i32(high_c - 15..=high_c - 5),
                humidity: rng.u32(30..=90),
            }
        })
        .collect();

    Ok(Forecast {
        city: city.to_string(),
        days,
    })
}

/// "Today", "Tomorrow", then the weekday name.
fn day_label(today: NaiveDate, offset: i64) -> String {
    match offset {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => weekday_name((today + Duration::days(offset)).weekday()).to_string(),
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
