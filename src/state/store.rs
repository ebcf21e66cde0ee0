//! TodoStore - process-held todo list with whole-list replacement

use crate::models::{InvalidTodoInput, TodoItem, TodoStatus};
use serde_json::Value;

/// Header line of every rendering
const HEADER: &str = "Todo List:";

/// Rendering of a store with no items
pub const EMPTY_LIST: &str = "Todo List: (empty)";

/// Owner of the current todo list
///
/// The list is only ever replaced wholesale through [`TodoStore::replace`].
#[derive(Debug, Default)]
pub struct TodoStore {
    items: Vec<TodoItem>,
}

/// Item counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoSummary {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl TodoSummary {
    pub fn count(&self, status: TodoStatus) -> usize {
        match status {
            TodoStatus::Pending => self.pending,
            TodoStatus::InProgress => self.in_progress,
            TodoStatus::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed
    }
}

impl TodoStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with `candidates` and return the new rendering.
    ///
    /// Every candidate is validated before anything is stored. On error the
    /// current list is left exactly as it was.
    pub fn replace(&mut self, candidates: &[Value]) -> Result<String, InvalidTodoInput> {
        let validated = candidates
            .iter()
            .enumerate()
            .map(|(index, raw)| TodoItem::from_value(index, raw))
            .collect::<Result<Vec<_>, _>>()?;

        self.items = validated;
        Ok(self.render())
    }

    /// Render the current list as caller-facing text
    pub fn render(&self) -> String {
        if self.items.is_empty() {
            return EMPTY_LIST.to_string();
        }

        let mut lines = Vec::with_capacity(self.items.len() + 3);
        lines.push(HEADER.to_string());

        for (i, item) in self.items.iter().enumerate() {
            lines.push(format!(
                "{}. [{}] {}",
                i + 1,
                item.status.marker(),
                item.display_text()
            ));
        }

        let summary = self.summary();
        let counts: Vec<String> = TodoStatus::ALL
            .iter()
            .map(|status| format!("{} {}", summary.count(*status), status.label()))
            .collect();

        lines.push(String::new());
        lines.push(format!("Summary: {}", counts.join(", ")));

        lines.join("\n")
    }

    /// Count items by status
    pub fn summary(&self) -> TodoSummary {
        self.items
            .iter()
            .fold(TodoSummary::default(), |mut summary, item| {
                match item.status {
                    TodoStatus::Pending => summary.pending += 1,
                    TodoStatus::InProgress => summary.in_progress += 1,
                    TodoStatus::Completed => summary.completed += 1,
                }
                summary
            })
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
