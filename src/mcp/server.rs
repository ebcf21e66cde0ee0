//! MCP Server implementation using JSON-RPC 2.0
//!
//! Implements the minimal MCP protocol:
//! - `initialize` - Return server info, capabilities and instructions
//! - `ping` - Liveness check
//! - `tools/list` - Return available tool definitions
//! - `tools/call` - Execute a tool and return result
//!
//! The same [`McpServer`] backs the stdio loop and the HTTP endpoint.

use crate::models::InvalidTodoInput;
use crate::state::TodoStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use super::tools::ToolRegistry;

/// Server name reported in `initialize`
pub const SERVER_NAME: &str = "todo";

/// MCP protocol revision implemented by this server
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const INSTRUCTIONS: &str = "A stateful todo list manager that maintains tasks throughout an agent \
session. Each task has a description (content), an active form for display during execution \
(activeForm), and a status (pending, in_progress, or completed). The entire todo list is \
replaced atomically with each update.";

/// MCP Server holding the tool registry and the todo store
pub struct McpServer {
    tool_registry: ToolRegistry,
    store: Mutex<TodoStore>,
}

/// JSON-RPC 2.0 Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Requests without an id are notifications and never get a response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, code: i32, message: impl Into<String>) -> Self {
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
}

/// JSON-RPC 2.0 Error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

// JSON-RPC error codes
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

type MethodResult = std::result::Result<Value, (i32, String)>;

impl McpServer {
    /// Create a new MCP server with an empty todo list
    pub fn new() -> Self {
        Self::with_store(TodoStore::new())
    }

    /// Create a server around an existing store
    pub fn with_store(store: TodoStore) -> Self {
        Self {
            tool_registry: ToolRegistry::new(),
            store: Mutex::new(store),
        }
    }

    /// Run the MCP server, reading from stdin and writing to stdout
    pub async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve newline-delimited JSON-RPC until the reader reaches EOF
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        tracing::info!("server started, waiting for requests");

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("read error: {}", e);
                    break;
                }
            };

            // Skip empty lines
            if line.trim().is_empty() {
                continue;
            }

            let Some(response) = self.handle_line(&line).await else {
                continue;
            };

            let mut response_json = serde_json::to_string(&response)?;
            response_json.push('\n');
            writer.write_all(response_json.as_bytes()).await?;
            writer.flush().await?;
        }

        tracing::info!("server stopped");
        Ok(())
    }

    /// Handle one raw JSON-RPC message
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        self.handle_request_json(&request).await
    }

    /// Handle a parsed JSON-RPC request.
    ///
    /// Returns `None` for notifications.
    pub async fn handle_request_json(&self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone().unwrap_or(Value::Null);
        let notification = request.is_notification();

        // Validate jsonrpc version
        if request.jsonrpc != "2.0" {
            if notification {
                tracing::warn!(method = %request.method, "dropped notification with invalid JSON-RPC version");
                return None;
            }
            return Some(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                "Invalid JSON-RPC version",
            ));
        }

        // Route to handler
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(&request.params),
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(&request.params).await,
            "shutdown" => {
                tracing::info!("shutdown requested");
                Ok(json!({}))
            }
            method if notification && method.starts_with("notifications/") => Ok(json!({})),
            "initialized" if notification => Ok(json!({})),
            _ => Err((
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )),
        };

        // Notifications are processed but never answered
        if notification {
            if let Err((code, message)) = &result {
                tracing::debug!(method = %request.method, code, "notification failed: {}", message);
            }
            return None;
        }

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err((code, message)) => JsonRpcResponse::failure(id, code, message),
        })
    }

    /// Current rendering of the todo list
    pub async fn render_todos(&self) -> String {
        self.store.lock().await.render()
    }

    /// Handle `initialize` request
    fn handle_initialize(&self, params: &Option<Value>) -> MethodResult {
        if let Some(client) = params.as_ref().and_then(|p| p.get("clientInfo")) {
            tracing::info!(client = %client, "client connected");
        }

        Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "capabilities": {
                "tools": {}
            },
            "instructions": INSTRUCTIONS
        }))
    }

    /// Handle `tools/list` request
    fn handle_tools_list(&self) -> MethodResult {
        let tools = self.tool_registry.list_tools();
        Ok(json!({ "tools": tools }))
    }

    /// Handle `tools/call` request
    async fn handle_tools_call(&self, params: &Option<Value>) -> MethodResult {
        let params = params
            .as_ref()
            .ok_or((INVALID_PARAMS, "Missing params".to_string()))?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or((INVALID_PARAMS, "Missing tool name".to_string()))?;

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        tracing::info!(tool = name, "calling tool");
        tracing::debug!(tool = name, args = %arguments, "tool arguments");

        // Validation, replacement and rendering happen under one lock
        let outcome = {
            let mut store = self.store.lock().await;
            self.tool_registry.call_tool(name, &arguments, &mut store)
        };

        match outcome {
            Ok(result) => Ok(json!({
                "content": [{
                    "type": "text",
                    "text": result
                }]
            })),
            Err(e) => {
                tracing::warn!(tool = name, "tool failed: {}", e);
                let mut response = json!({
                    "content": [{
                        "type": "text",
                        "text": format!("Error: {}", e)
                    }],
                    "isError": true
                });
                if let Some(invalid) = e.downcast_ref::<InvalidTodoInput>() {
                    response["structuredContent"] = invalid_input_details(invalid);
                }
                Ok(response)
            }
        }
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Machine-readable description of a rejected todo list
fn invalid_input_details(err: &InvalidTodoInput) -> Value {
    json!({
        "error": "InvalidTodoInput",
        "index": err.index,
        "field": err.field.as_str(),
        "reason": err.reason.to_string()
    })
}
