// todo-mcp - Stateful todo list MCP server
// Keeps one agent-maintained task list in memory for the lifetime of the process

pub mod cli;
pub mod config;
pub mod logging;
pub mod mcp;
pub mod models;
pub mod state;

pub use anyhow::{Context, Result};

// Re-export commonly used types
pub use models::{InvalidTodoInput, TodoItem, TodoStatus};
pub use state::TodoStore;
