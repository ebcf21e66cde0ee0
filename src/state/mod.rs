pub mod store;

pub use store::{TodoStore, TodoSummary, EMPTY_LIST};
