//! Integration tests for the todo store
//!
//! Covers replacement semantics and rendering through the public library API.

use serde_json::{json, Value};
use todo_mcp::state::EMPTY_LIST;
use todo_mcp::{TodoStatus, TodoStore};

fn todo(content: &str, active_form: &str, status: &str) -> Value {
    json!({ "content": content, "activeForm": active_form, "status": status })
}

fn example_list() -> Vec<Value> {
    vec![
        todo("Research API options", "Researching API options", "completed"),
        todo("Implement authentication", "Implementing authentication", "in_progress"),
        todo("Write tests", "Writing tests", "pending"),
        todo("Deploy to production", "Deploying to production", "pending"),
    ]
}

#[test]
fn test_example_scenario_renders_exactly() {
    let mut store = TodoStore::new();
    let output = store.replace(&example_list()).unwrap();

    assert_eq!(
        output,
        [
            "Todo List:",
            "1. [x] Research API options",
            "2. [~] Implementing authentication",
            "3. [ ] Write tests",
            "4. [ ] Deploy to production",
            "",
            "Summary: 2 pending, 1 in progress, 1 completed",
        ]
        .join("\n")
    );
}

#[test]
fn test_replace_is_idempotent() {
    let mut store = TodoStore::new();
    let first = store.replace(&example_list()).unwrap();
    let second = store.replace(&example_list()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_order_is_preserved() {
    let mut store = TodoStore::new();
    let names = ["Zeta", "Alpha", "Mu", "Beta"];
    let list: Vec<Value> = names
        .iter()
        .map(|n| todo(n, &format!("Doing {}", n), "pending"))
        .collect();

    let output = store.replace(&list).unwrap();

    let positions: Vec<usize> = names.iter().map(|n| output.find(n).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    for (i, name) in names.iter().enumerate() {
        assert!(output.contains(&format!("{}. [ ] {}", i + 1, name)));
    }
}

#[test]
fn test_summary_counts_match_statuses() {
    let statuses = [
        "pending",
        "completed",
        "in_progress",
        "completed",
        "pending",
        "completed",
    ];
    let list: Vec<Value> = statuses
        .iter()
        .enumerate()
        .map(|(i, s)| todo(&format!("Task {}", i), &format!("Doing task {}", i), s))
        .collect();

    let mut store = TodoStore::new();
    let output = store.replace(&list).unwrap();
    let summary = store.summary();

    assert_eq!(summary.total(), list.len());
    for status in TodoStatus::ALL {
        let expected = statuses.iter().filter(|s| **s == status.as_str()).count();
        assert_eq!(summary.count(status), expected);
    }
    assert!(output.ends_with("Summary: 2 pending, 1 in progress, 3 completed"));
}

#[test]
fn test_marker_mapping() {
    let mut store = TodoStore::new();
    let output = store
        .replace(&[
            todo("Ship it", "Shipping it", "completed"),
            todo("Build it", "Building it", "in_progress"),
            todo("Plan it", "Planning it", "pending"),
        ])
        .unwrap();

    assert!(output.contains("1. [x] Ship it"));
    assert!(output.contains("2. [~] Building it"));
    assert!(!output.contains("Build it\n"));
    assert!(output.contains("3. [ ] Plan it"));
    assert!(!output.contains("Planning it"));
}

#[test]
fn test_rejection_leaves_state_untouched() {
    let mut store = TodoStore::new();
    store.replace(&example_list()).unwrap();
    let before = store.render();

    let mut bad = example_list();
    bad[0]["status"] = json!("done");
    let err = store.replace(&bad).unwrap_err();

    assert_eq!(err.index, 0);
    assert_eq!(err.field.as_str(), "status");
    assert_eq!(store.render(), before);
    assert_eq!(store.len(), 4);
}

#[test]
fn test_empty_list_scenario() {
    let mut store = TodoStore::new();
    store.replace(&example_list()).unwrap();

    let output = store.replace(&[]).unwrap();

    assert_eq!(output, EMPTY_LIST);
    assert_eq!(store.render(), EMPTY_LIST);
    assert!(!output.contains("1."));
    assert!(!output.contains("Summary"));
}

#[test]
fn test_independent_stores() {
    let mut a = TodoStore::new();
    let b = TodoStore::new();
    a.replace(&example_list()).unwrap();
    assert_eq!(a.len(), 4);
    assert!(b.is_empty());
}
