//! MCP (Model Context Protocol) Server for the todo list
//!
//! ## Tools
//! - `write_todos` - Replace the whole todo list and return its rendering
//!
//! ## Transports
//! - stdio: newline-delimited JSON-RPC 2.0 ([`McpServer::run`])
//! - HTTP: `POST /mcp` ([`start_server`])

pub mod config;
pub mod http_server;
pub mod server;
pub mod tools;

pub use config::{
    ensure_claude_mcp_json, ensure_codex_mcp_config, ensure_gemini_mcp_config, ClientTransport,
};
pub use http_server::{router, start_server, AppState};
pub use server::McpServer;
