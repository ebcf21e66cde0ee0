//! HTTP transport for the MCP server
//!
//! Routes:
//! - `POST /mcp` - JSON-RPC endpoint (bearer auth when a token is configured)
//! - `GET /health` - Liveness check

use crate::config::ServerConfig;
use crate::mcp::server::{JsonRpcResponse, McpServer, INVALID_REQUEST, PARSE_ERROR};
use crate::Result;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub server: Arc<McpServer>,
    pub auth_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(server: Arc<McpServer>, auth_token: Option<String>) -> Self {
        Self {
            server,
            auth_token: auth_token.map(Arc::from),
        }
    }
}

/// Build the router for the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp_request))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server and serve until Ctrl-C
pub async fn start_server(config: &ServerConfig, server: Arc<McpServer>) -> Result<()> {
    let addr = config.addr()?;
    let state = AppState::new(server, config.auth_token.clone());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{}", addr);
    tracing::info!("MCP endpoint: http://{}/mcp", addr);
    if config.auth_token.is_some() {
        tracing::info!("bearer token authentication enabled");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Main MCP request handler
async fn handle_mcp_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(token) = state.auth_token.as_deref() {
        if !is_authorized(&headers, token) {
            tracing::warn!("rejected MCP request with missing or invalid bearer token");
            let response =
                JsonRpcResponse::failure(Value::Null, INVALID_REQUEST, "Unauthorized");
            return (StatusCode::UNAUTHORIZED, Json(response)).into_response();
        }
    }

    let body = match std::str::from_utf8(&body) {
        Ok(body) => body,
        Err(e) => {
            let response =
                JsonRpcResponse::failure(Value::Null, PARSE_ERROR, format!("Parse error: {}", e));
            return Json(response).into_response();
        }
    };

    match state.server.handle_line(body).await {
        Some(response) => Json(response).into_response(),
        // Notification - return HTTP 202 Accepted with empty body
        None => (StatusCode::ACCEPTED, "").into_response(),
    }
}

/// Check the `Authorization: Bearer <token>` header
fn is_authorized(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split_once(' '))
        .map(|(scheme, token)| scheme.eq_ignore_ascii_case("Bearer") && token == expected)
        .unwrap_or(false)
}
