use std::collections::HashSet;

use gridline::ExpansionController;
use serde_json::{Value, json};

#[test]
fn test_toggle_twice_restores_state() {
    let mut expansion: ExpansionController<Value> = ExpansionController::uncontrolled();

    let first = expansion.toggle("r1");
    assert!(first.is_expanded);
    assert_eq!(first.changed_row_id, "r1");
    assert!(first.expanded.contains("r1"));
    assert!(expansion.is_expanded("r1"));

    let second = expansion.toggle("r1");
    assert!(!second.is_expanded);
    assert!(second.expanded.is_empty());
    assert!(!expansion.is_expanded("r1"));
}

#[test]
fn test_change_reports_whole_set() {
    let mut expansion: ExpansionController<Value> = ExpansionController::uncontrolled();
    expansion.toggle("a");
    let change = expansion.toggle("b");
    let expected: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
    assert_eq!(change.expanded, expected);
}

#[test]
fn test_predicate_gates_toggle() {
    let mut expansion = ExpansionController::uncontrolled()
        .with_predicate(|row: &Value, _| row["children"].is_array());
    let leaf = json!({"id": 1});
    let parent = json!({"id": 2, "children": []});

    assert!(!expansion.is_expandable(&leaf, 0));
    assert_eq!(expansion.toggle_row(&leaf, 0, "1"), None);
    assert!(expansion.toggle_row(&parent, 1, "2").is_some());
    assert!(expansion.is_expanded("2"));
}

#[test]
fn test_controlled_expansion_waits_for_sync() {
    let mut expansion: ExpansionController<Value> =
        ExpansionController::controlled(vec!["x".to_string()]);
    let change = expansion.toggle("x");
    assert!(!change.is_expanded);
    assert!(expansion.is_expanded("x"));

    assert!(expansion.sync(change.expanded));
    assert!(!expansion.is_expanded("x"));
}
