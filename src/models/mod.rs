pub mod todo;

pub use todo::{InvalidTodoInput, TodoField, TodoItem, TodoStatus, Violation};
