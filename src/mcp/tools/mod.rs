//! MCP Tool Registry and Implementations
//!
//! Tools validate their arguments and operate on the server-owned todo store.

pub mod write_todos;

use crate::state::TodoStore;
use crate::Result;
use serde_json::{json, Value};

/// Registry of available MCP tools
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

/// Tool definition for MCP protocol
#[derive(Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub title: Option<String>,
    pub description: String,
    pub input_schema: Value,
}

impl ToolRegistry {
    /// Create a new tool registry with all available tools
    pub fn new() -> Self {
        Self {
            tools: vec![write_todos::definition()],
        }
    }

    /// List all available tools in MCP format
    pub fn list_tools(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|t| {
                let mut tool = json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                });
                if let Some(title) = &t.title {
                    tool["title"] = json!(title);
                }
                tool
            })
            .collect()
    }

    /// Call a tool by name with the given arguments
    pub fn call_tool(&self, name: &str, arguments: &Value, store: &mut TodoStore) -> Result<String> {
        match name {
            write_todos::NAME => write_todos::execute(arguments, store),
            _ => anyhow::bail!("Unknown tool: {}", name),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to extract a required array field from JSON
pub fn get_required_array(args: &Value, field: &str) -> Result<Vec<Value>> {
    args.get(field)
        .and_then(|v| v.as_array())
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Missing required array field: {}", field))
}
