//! Diagnostic logging
//!
//! All output goes to stderr; stdout carries MCP traffic in stdio mode.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable checked before `RUST_LOG`
pub const LOG_ENV: &str = "TODO_MCP_LOG";

/// Initialize the tracing subscriber.
///
/// Filter precedence: `TODO_MCP_LOG`, then `RUST_LOG`, then `info`
/// (`debug` when `verbose` is set).
///
/// # Example
/// ```bash
/// TODO_MCP_LOG=todo_mcp=debug todo-mcp stdio
/// ```
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true)
                .compact(),
        )
        .init();
}
