//! HTTP transport implementation.
//!
//! Stateless JSON-RPC over POST requests, the shape serverless hosts expect:
//! every request is answered on its own and no session is kept between
//! them. Standard HTTP clients (curl, browsers, etc.) can talk to it.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::server::INSTRUCTIONS;

/// Protocol revision advertised in `initialize` responses.
pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum application for this transport.
    pub fn router(&self, server: McpServer) -> Router {
        let rpc_path = self.config.rpc_path.clone();
        let mut app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route(
                "/",
                get(move |State(server): State<McpServer>| root_handler(server, rpc_path.clone())),
            )
            .with_state(server)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(server: McpServer, rpc_path: String) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": server.name(),
        "version": server.version(),
        "transport": "HTTP",
        "port": server.config().port(),
        "endpoints": {
            "rpc": rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "documentation": "Send POST requests to the RPC endpoint with JSON-RPC messages"
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(server): State<McpServer>,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    tracing::Span::current().record("method", request.method.as_str());
    info!("Received JSON-RPC request: {}", request.method);

    // Notifications carry no id and get no body back.
    if request.method.starts_with("notifications/") {
        debug!("Received notification: {}", request.method);
        return StatusCode::ACCEPTED.into_response();
    }

    let response = process_request(&server, request);
    (StatusCode::OK, Json(response)).into_response()
}

/// Process a JSON-RPC request and return the response.
fn process_request(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    match request.method.as_str() {
        "initialize" => handle_initialize(server, request),
        "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),
        "tools/list" => handle_tools_list(server, request),
        "tools/call" => handle_tools_call(server, request),
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    }
}

/// Handle initialize request.
fn handle_initialize(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing initialize request");

    let result = serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        },
        "instructions": INSTRUCTIONS
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/list request.
fn handle_tools_list(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/list request");

    let result = serde_json::json!({
        "tools": server.list_tools()
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/call request.
fn handle_tools_call(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/call request");

    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id, "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id, "Missing tool name"),
    };

    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::json!({}));

    match server.call_tool(&name, arguments) {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e),
    }
}
