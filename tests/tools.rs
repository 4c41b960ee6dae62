//! End-to-end checks of the built-in tools through the public registry and
//! server APIs.

use std::sync::Arc;

use hello_mcp_server::domains::tools::InvocationRequest;
use hello_mcp_server::{Config, McpServer, ToolError, ToolRegistry};
use serde_json::{Value, json};

fn registry() -> ToolRegistry {
    ToolRegistry::with_defaults(Arc::new(Config::default())).unwrap()
}

fn call(name: &str, arguments: Value) -> Result<String, ToolError> {
    registry().dispatch(&InvocationRequest::new(name, arguments))
}

#[test]
fn registers_seven_tools_in_order() {
    assert_eq!(
        registry().names(),
        vec![
            "welcome",
            "get_weather",
            "calculate",
            "generate_password",
            "analyze_text",
            "convert_units",
            "server_info",
        ]
    );
}

#[test]
fn welcome_greets_by_name() {
    assert_eq!(
        call("welcome", json!({ "name": "Ada" })).unwrap(),
        "Welcome Ada from this amazing application!"
    );
}

#[test]
fn calculate_respects_precedence() {
    assert_eq!(
        call("calculate", json!({ "expression": "2 + 3 * 4" })).unwrap(),
        "2 + 3 * 4 = 14"
    );
}

#[test]
fn calculate_rejects_code() {
    let err = call("calculate", json!({ "expression": "import os" })).unwrap_err();
    assert!(matches!(err, ToolError::Validation(_)));
    assert!(err.to_string().contains("import os"));
}

#[test]
fn convert_units_temperatures() {
    let freezing = call(
        "convert_units",
        json!({ "value": 0, "from_unit": "celsius", "to_unit": "fahrenheit" }),
    )
    .unwrap();
    assert!(freezing.ends_with("32.0000 fahrenheit"));

    let boiling = call(
        "convert_units",
        json!({ "value": 100, "from_unit": "celsius", "to_unit": "fahrenheit" }),
    )
    .unwrap();
    assert!(boiling.ends_with("212.0000 fahrenheit"));
}

#[test]
fn password_length_bounds() {
    assert!(matches!(
        call("generate_password", json!({ "length": 7 })),
        Err(ToolError::Validation(_))
    ));

    let text = call("generate_password", json!({ "length": 12 })).unwrap();
    let password = text
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("Generated password: "))
        .unwrap();
    assert_eq!(password.chars().count(), 12);
    assert!(text.contains("Length: 12 characters"));
}

#[test]
fn analyze_text_rejects_empty_input() {
    assert!(matches!(
        call("analyze_text", json!({ "text": "" })),
        Err(ToolError::Validation(_))
    ));
}

#[test]
fn weather_forecast_is_capped_at_seven_days() {
    let text = call("get_weather", json!({ "city": "Paris", "days": 10 })).unwrap();
    assert!(text.starts_with("Weather forecast for Paris (7 days):"));
    assert_eq!(text.lines().filter(|l| l.contains("°C")).count(), 7);
}

#[test]
fn server_info_lists_every_tool() {
    let text = call("server_info", json!({})).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["tools"].as_array().map(Vec::len), Some(7));
}

#[test]
fn request_errors_are_distinguished() {
    assert!(matches!(
        call("does_not_exist", json!({})),
        Err(ToolError::NotFound(_))
    ));
    assert!(matches!(
        call("welcome", json!({})),
        Err(ToolError::MissingParameter(_))
    ));
    assert!(matches!(
        call("welcome", json!({ "name": "Ada", "mood": "happy" })),
        Err(ToolError::InvalidParameter { .. })
    ));
}

#[test]
fn concurrent_calls_share_one_server() {
    let server = McpServer::new(Config::default()).unwrap();

    let results = tokio_test::block_on(async {
        let calls = (1..=16).map(|i| {
            let server = server.clone();
            async move {
                server
                    .call_tool("calculate", json!({ "expression": format!("{i} ^ 2") }))
                    .unwrap()
            }
        });
        futures::future::join_all(calls).await
    });

    for (i, result) in (1..=16).zip(results) {
        assert_eq!(
            result["content"][0]["text"],
            format!("{i} ^ 2 = {}", i * i)
        );
    }
}
