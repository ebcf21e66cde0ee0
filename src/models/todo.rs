//! Todo item model and per-item validation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Status of a single todo item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Pending,
    InProgress,
    Completed,
}

impl TodoStatus {
    /// All statuses, in summary order
    pub const ALL: [TodoStatus; 3] = [
        TodoStatus::Pending,
        TodoStatus::InProgress,
        TodoStatus::Completed,
    ];

    /// Parse the wire literal. Matching is exact and case-sensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(TodoStatus::Pending),
            "in_progress" => Some(TodoStatus::InProgress),
            "completed" => Some(TodoStatus::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::InProgress => "in_progress",
            TodoStatus::Completed => "completed",
        }
    }

    /// Checkbox marker used when rendering
    pub fn marker(&self) -> char {
        match self {
            TodoStatus::Pending => ' ',
            TodoStatus::InProgress => '~',
            TodoStatus::Completed => 'x',
        }
    }

    /// Label used in the summary line
    pub fn label(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::InProgress => "in progress",
            TodoStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Imperative task description
    pub content: String,

    /// Present-continuous description, shown while the item is in progress
    #[serde(rename = "activeForm")]
    pub active_form: String,

    pub status: TodoStatus,
}

impl TodoItem {
    pub fn new(
        content: impl Into<String>,
        active_form: impl Into<String>,
        status: TodoStatus,
    ) -> Self {
        Self {
            content: content.into(),
            active_form: active_form.into(),
            status,
        }
    }

    /// Validate one raw candidate taken from a request payload.
    ///
    /// Fields are checked in the order `content`, `activeForm`, `status` and the
    /// first violation is reported. Unknown fields are ignored. Text is stored
    /// verbatim; trimming only decides emptiness.
    pub fn from_value(index: usize, raw: &Value) -> Result<Self, InvalidTodoInput> {
        let object = raw
            .as_object()
            .ok_or_else(|| InvalidTodoInput::new(index, TodoField::Item, Violation::NotAnObject))?;

        let content = required_str(object, index, TodoField::Content)?;
        if content.trim().is_empty() {
            return Err(InvalidTodoInput::new(index, TodoField::Content, Violation::Empty));
        }

        let active_form = required_str(object, index, TodoField::ActiveForm)?;
        if active_form.trim().is_empty() {
            return Err(InvalidTodoInput::new(
                index,
                TodoField::ActiveForm,
                Violation::Empty,
            ));
        }

        let raw_status = required_str(object, index, TodoField::Status)?;
        let status = TodoStatus::parse(raw_status).ok_or_else(|| {
            InvalidTodoInput::new(
                index,
                TodoField::Status,
                Violation::UnknownStatus(raw_status.to_string()),
            )
        })?;

        Ok(Self::new(content, active_form, status))
    }

    /// Text shown for this item: the active form while in progress, the content otherwise
    pub fn display_text(&self) -> &str {
        match self.status {
            TodoStatus::InProgress => &self.active_form,
            _ => &self.content,
        }
    }
}

/// Look up a required string field on a raw candidate
fn required_str<'a>(
    object: &'a Map<String, Value>,
    index: usize,
    field: TodoField,
) -> Result<&'a str, InvalidTodoInput> {
    let value = object
        .get(field.as_str())
        .filter(|v| !v.is_null())
        .ok_or_else(|| InvalidTodoInput::new(index, field, Violation::Missing))?;
    value
        .as_str()
        .ok_or_else(|| InvalidTodoInput::new(index, field, Violation::NotAString))
}

/// Field of a todo candidate that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoField {
    /// The candidate as a whole
    Item,
    Content,
    ActiveForm,
    Status,
}

impl TodoField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoField::Item => "item",
            TodoField::Content => "content",
            TodoField::ActiveForm => "activeForm",
            TodoField::Status => "status",
        }
    }
}

impl fmt::Display for TodoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule broken by a todo candidate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("must be an object")]
    NotAnObject,

    #[error("is required")]
    Missing,

    #[error("must be a string")]
    NotAString,

    #[error("must not be empty")]
    Empty,

    #[error("must be one of pending, in_progress, completed (got '{0}')")]
    UnknownStatus(String),
}

/// Rejected todo list update
///
/// `index` is the 0-based position of the offending candidate in the request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid todo at todos[{index}]: {field} {reason}")]
pub struct InvalidTodoInput {
    pub index: usize,
    pub field: TodoField,
    pub reason: Violation,
}

impl InvalidTodoInput {
    pub fn new(index: usize, field: TodoField, reason: Violation) -> Self {
        Self {
            index,
            field,
            reason,
        }
    }
}
