use std::cell::RefCell;
use std::rc::Rc;

use gridline::{ActionMenu, RowAction};
use serde_json::{Value, json};

fn recorder() -> (Rc<RefCell<Vec<(Value, usize)>>>, RowAction<Value>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let action = RowAction::new("Archive", move |row: &Value, index| {
        sink.borrow_mut().push((row.clone(), index));
    });
    (calls, action)
}

#[test]
fn test_execute_calls_handler_and_closes() {
    let data = vec![json!({"id": "a"}), json!({"id": "b"})];
    let (calls, action) = recorder();
    let mut menu = ActionMenu::new();

    menu.open(1);
    assert!(menu.is_open());
    assert!(menu.execute(&action, &data));
    assert!(!menu.is_open());
    assert_eq!(*calls.borrow(), vec![(json!({"id": "b"}), 1)]);
}

#[test]
fn test_disabled_action_is_inert() {
    let data = vec![json!({"id": "a", "archived": true})];
    let (calls, action) = recorder();
    let action = action.disabled_if(|row: &Value| row["archived"] == json!(true));
    let mut menu = ActionMenu::new();

    menu.open(0);
    assert!(action.is_disabled(&data[0]));
    assert!(!menu.execute(&action, &data));
    assert!(menu.is_open());
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_execute_with_closed_menu_does_nothing() {
    let data = vec![json!({"id": "a"})];
    let (calls, action) = recorder();
    let mut menu = ActionMenu::new();
    assert!(!menu.execute(&action, &data));
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_stale_target_closes_menu() {
    let (calls, action) = recorder();
    let mut menu = ActionMenu::new();
    menu.open(3);
    assert!(!menu.execute(&action, &[json!({"id": "a"})]));
    assert!(!menu.is_open());
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_destructive_tone() {
    let (_, action) = recorder();
    let action = action.destructive().icon("🗑");
    assert_eq!(action.tone, Some(gridline::Tone::Danger));
    assert_eq!(action.icon.as_deref(), Some("🗑"));
}
