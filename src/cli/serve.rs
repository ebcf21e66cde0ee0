//! serve CLI subcommand
//!
//! Serves MCP over HTTP at `POST /mcp`.

use crate::config::ServerConfig;
use crate::mcp::McpServer;
use crate::Result;
use colored::Colorize;
use std::sync::Arc;

/// Run the HTTP server until Ctrl-C
pub async fn run(config: ServerConfig) -> Result<()> {
    let config = config.normalized();
    // Fail on a bad host before printing anything
    config.addr()?;

    println!("{}", format!("✓ MCP endpoint: {}", config.mcp_url()).green());
    if config.auth_token.is_some() {
        println!("{}", "  Authorization: Bearer token required".cyan());
    }

    let server = Arc::new(McpServer::new());
    crate::mcp::start_server(&config, server).await
}
