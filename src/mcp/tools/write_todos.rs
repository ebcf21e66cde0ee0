//! write_todos MCP Tool
//!
//! Replaces the whole session todo list and returns its rendering.

use super::{get_required_array, ToolDefinition};
use crate::state::TodoStore;
use crate::Result;
use serde_json::{json, Value};

pub const NAME: &str = "write_todos";

/// Get the tool definition for write_todos
pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        title: Some("Write Todo List".to_string()),
        description: "Replace the entire todo list with a new list of todos. Each todo must have \
                      'content' (imperative task description), 'activeForm' (present continuous \
                      form), and 'status' (pending/in_progress/completed)."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "required": ["todos"],
            "properties": {
                "todos": {
                    "type": "array",
                    "description": "List of todo objects with 'content', 'activeForm', and 'status' fields",
                    "items": {
                        "type": "object",
                        "required": ["content", "activeForm", "status"],
                        "properties": {
                            "content": {
                                "type": "string",
                                "minLength": 1,
                                "description": "Imperative task description (e.g. 'Run tests')"
                            },
                            "activeForm": {
                                "type": "string",
                                "minLength": 1,
                                "description": "Present continuous form shown while in progress (e.g. 'Running tests')"
                            },
                            "status": {
                                "enum": ["pending", "in_progress", "completed"],
                                "description": "Task status"
                            }
                        }
                    }
                }
            }
        }),
    }
}

/// Execute the write_todos tool
pub fn execute(args: &Value, store: &mut TodoStore) -> Result<String> {
    let todos = get_required_array(args, "todos")?;
    let rendered = store.replace(&todos)?;

    tracing::debug!(items = store.len(), "todo list replaced");
    Ok(rendered)
}
