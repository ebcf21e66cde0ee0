//! stdio CLI subcommand
//!
//! Serves MCP over stdin/stdout with JSON-RPC 2.0, one message per line.

use crate::mcp::McpServer;
use crate::Result;

/// Run the MCP server on stdio
pub async fn run() -> Result<()> {
    let server = McpServer::new();
    server.run().await
}
