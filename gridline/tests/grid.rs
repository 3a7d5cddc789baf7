use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use gridline::node::text::render_lines;
use gridline::prelude::*;
use serde_json::{Value, json};

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::new("name", "Name").sortable(),
        Column::new("price", "Price").kind(ColumnType::Money),
        Column::new("secret", "Secret").hidden(),
    ]
}

fn rows(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|id| {
            json!({
                "id": id,
                "name": format!("Part {id}"),
                "price": id as f64 * 1.5,
                "secret": "classified",
            })
        })
        .collect()
}

fn ids(range: std::ops::RangeInclusive<usize>) -> Vec<RowId> {
    let mut ids: Vec<RowId> = range.map(|id| id.to_string()).collect();
    ids.sort();
    ids
}

fn sorted(set: &HashSet<RowId>) -> Vec<RowId> {
    let mut ids: Vec<RowId> = set.iter().cloned().collect();
    ids.sort();
    ids
}

fn checkbox_state(tree: &Node, id: &str) -> Option<CheckState> {
    match tree.find(id) {
        Some(Node::Checkbox { state, .. }) => Some(*state),
        _ => None,
    }
}

// =============================================================================
// Render precedence
// =============================================================================

#[test]
fn test_error_wins_over_loading_and_data() {
    let grid = Grid::new(columns(), GridMode::Root)
        .data(rows(3))
        .loading(true)
        .error("boom");
    let tree = grid.render();
    assert_eq!(tree.id(), Some(grid.element_id("error").as_str()));
    assert!(tree.texts().contains(&"boom".to_string()));
    assert!(tree.find(&grid.element_id("row-1")).is_none());
    assert!(tree.find(&grid.element_id("retry")).is_none());
}

#[test]
fn test_error_offers_retry_with_refresh() {
    let refreshed = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&refreshed);
    let mut grid = Grid::new(columns(), GridMode::Root)
        .error("boom")
        .on_refresh(move || *sink.borrow_mut() += 1);
    assert!(grid.render().find(&grid.element_id("retry")).is_some());
    assert!(grid.refresh().is_handled());
    assert_eq!(*refreshed.borrow(), 1);
}

#[test]
fn test_loading_shows_only_spinner() {
    let grid = Grid::new(columns(), GridMode::Root)
        .data(rows(3))
        .loading(true);
    let tree = grid.render();
    assert_eq!(tree.id(), Some(grid.element_id("loading").as_str()));
    assert_eq!(tree.texts(), vec!["Loading...".to_string()]);
}

#[test]
fn test_empty_state() {
    let grid = Grid::new(columns(), GridMode::Root).searchable(true);
    let tree = grid.render();
    assert!(tree.find(&grid.element_id("empty")).is_some());
    assert!(tree.find(&grid.element_id("search")).is_some());
    assert!(tree.find(&grid.element_id("header")).is_none());
    assert!(tree.texts().contains(&"No data available".to_string()));
}

#[test]
fn test_populated_grid() {
    let grid = Grid::new(columns(), GridMode::Root).data(rows(2));
    let tree = grid.render();
    let texts = tree.texts();
    assert!(texts.contains(&"Part 1".to_string()));
    assert!(texts.contains(&"$3.00".to_string()));
    assert!(!texts.contains(&"classified".to_string()));
    assert!(tree.find(&grid.element_id("row-2")).is_some());
    assert!(tree.find(&grid.element_id("select-all")).is_none());
    assert!(!render_lines(&tree).is_empty());
}

// =============================================================================
// Root and child modes
// =============================================================================

#[test]
fn test_root_owns_scroll_and_footer() {
    let grid = Grid::new(columns(), GridMode::Root)
        .data(rows(3))
        .pagination(Pagination::new(1, 10, 3));
    let tree = grid.render();
    assert!(tree.find(&grid.element_id("scroll")).is_some());
    let footer = tree.find(&grid.element_id("footer")).unwrap();
    assert!(footer.texts().contains(&"1-3 of 3".to_string()));
}

#[test]
fn test_child_has_no_scroll_or_footer() {
    let mut grid = Grid::new(columns(), GridMode::Child)
        .data(rows(3))
        .pagination(Pagination::new(1, 10, 30));
    let tree = grid.render();
    assert!(tree.find(&grid.element_id("scroll")).is_none());
    assert!(tree.find(&grid.element_id("footer")).is_none());
    assert_eq!(grid.next_page(), EventResult::Ignored);
}

#[test]
fn test_nested_child_grid_in_expanded_row() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    let data = vec![
        json!({"id": 1, "name": "Bolt", "variants": [{"sku": "B-1-S"}, {"sku": "B-1-L"}]}),
        json!({"id": 2, "name": "Nut"}),
    ];
    let mut grid = Grid::new(vec![Column::new("name", "Name")], GridMode::Root)
        .data(data)
        .expandable_rows(
            ExpandableRows::new(|row: &Value, _| {
                let variants = row["variants"].as_array().cloned().unwrap_or_default();
                Grid::new(vec![Column::new("sku", "SKU")], GridMode::Child)
                    .data(variants)
                    .render()
            })
            .expandable_if(|row: &Value, _| row["variants"].is_array())
            .on_expanded_rows_change(move |change: &ExpansionChange| {
                sink.borrow_mut().push(change.clone())
            }),
        );

    let tree = grid.render();
    assert!(tree.find(&grid.element_id("expand-1")).is_some());
    assert!(tree.find(&grid.element_id("expand-2")).is_none());
    assert!(tree.find(&grid.element_id("expanded-1")).is_none());

    assert!(grid.toggle_expanded("1").is_handled());
    assert_eq!(grid.toggle_expanded("2"), EventResult::Ignored);

    let tree = grid.render();
    let expanded = tree.find(&grid.element_id("expanded-1")).unwrap();
    assert!(expanded.texts().contains(&"B-1-L".to_string()));
    assert_eq!(tree.count(&|node: &Node| matches!(node, Node::Scroll { .. })), 1);

    assert!(grid.toggle_expanded("1").is_handled());
    let changes = changes.borrow();
    assert_eq!(changes.len(), 2);
    assert!(changes[0].is_expanded);
    assert!(!changes[1].is_expanded);
    assert_eq!(changes[1].changed_row_id, "1");
}

#[test]
fn test_controlled_expansion() {
    let mut grid = Grid::new(vec![Column::new("name", "Name")], GridMode::Root)
        .data(rows(2))
        .expandable_rows(
            ExpandableRows::new(|_: &Value, index| Node::text(format!("details {index}")))
                .expanded_rows(vec!["2".to_string()]),
        );
    assert_eq!(grid.expanded_rows(), vec!["2".to_string()]);
    assert!(grid.render().texts().contains(&"details 1".to_string()));

    grid.toggle_expanded("1");
    assert_eq!(grid.expanded_rows(), vec!["2".to_string()]);
    assert!(grid.set_expanded_rows(vec!["1".to_string()]));
    assert!(grid.is_expanded("1"));
    assert!(!grid.is_expanded("2"));
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_uncontrolled_selection() {
    let emitted = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&emitted);
    let mut grid = Grid::new(columns(), GridMode::Root)
        .data(rows(3))
        .selectable(true)
        .on_selection_change(move |ids| sink.borrow_mut().push(sorted(ids)));

    assert!(grid.toggle_row("2", true).is_handled());
    assert_eq!(grid.selected_rows(), vec!["2".to_string()]);
    let tree = grid.render();
    assert_eq!(
        checkbox_state(&tree, &grid.element_id("select-2")),
        Some(CheckState::Checked)
    );
    assert_eq!(
        checkbox_state(&tree, &grid.element_id("select-all")),
        Some(CheckState::Partial)
    );

    grid.toggle_all();
    assert_eq!(grid.selected_rows(), ids(1..=3));
    grid.toggle_all();
    assert!(grid.selected_rows().is_empty());
    assert_eq!(emitted.borrow().len(), 3);
    assert_eq!(emitted.borrow()[1], ids(1..=3));
}

#[test]
fn test_unselectable_rows_render_disabled_with_hint() {
    let mut grid = Grid::new(columns(), GridMode::Root)
        .data(rows(3))
        .selectable(true)
        .row_selectable(|row: &Value, _| {
            if row["id"] == json!(2) {
                RowSelectability::blocked("Already shipped")
            } else {
                RowSelectability::allowed()
            }
        });

    grid.toggle_all();
    assert_eq!(grid.selected_rows(), vec!["1".to_string(), "3".to_string()]);
    assert_eq!(grid.toggle_row("2", true), EventResult::Ignored);

    let tree = grid.render();
    match tree.find(&grid.element_id("select-2")) {
        Some(Node::Checkbox { disabled, hint, .. }) => {
            assert!(*disabled);
            assert_eq!(hint.as_deref(), Some("Already shipped"));
        }
        other => panic!("unexpected node {other:?}"),
    }
}

#[test]
fn test_controlled_selection_across_pages() {
    let emitted = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&emitted);
    let mut grid = Grid::new(columns(), GridMode::Root)
        .data(rows(8))
        .selectable(true)
        .with_selected_rows(Vec::new())
        .pagination(Pagination::new(1, 5, 8))
        .local_pagination(true)
        .on_selection_change(move |ids| sink.borrow_mut().push(ids.clone()));

    assert!(grid.toggle_all().is_handled());
    let first = emitted.borrow()[0].clone();
    assert_eq!(sorted(&first), ids(1..=5));
    assert!(grid.selected_rows().is_empty());

    assert!(grid.set_selected_rows(first));
    assert!(grid.next_page().is_handled());
    assert_eq!(grid.current_pagination().map(|p| p.page), Some(2));

    let tree = grid.render();
    assert!(tree.find(&grid.element_id("row-6")).is_some());
    assert!(tree.find(&grid.element_id("row-1")).is_none());
    assert_eq!(
        checkbox_state(&tree, &grid.element_id("select-all")),
        Some(CheckState::Unchecked)
    );

    grid.toggle_all();
    assert_eq!(sorted(&emitted.borrow()[1]), ids(1..=8));
}

// =============================================================================
// Header, toolbar, rows
// =============================================================================

#[test]
fn test_press_header_requests_sort() {
    let requested = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&requested);
    let mut grid = Grid::new(columns(), GridMode::Root)
        .data(rows(2))
        .sort(Some(SortConfig::ascending("name")))
        .on_sort_change(move |sort| sink.borrow_mut().push(sort.clone()));

    match grid.render().find(&grid.element_id("header-name")) {
        Some(Node::Button { label, .. }) => assert_eq!(label, "Name ▲"),
        other => panic!("unexpected node {other:?}"),
    }

    assert!(grid.press_header("name").is_handled());
    assert_eq!(grid.press_header("price"), EventResult::Ignored);
    assert_eq!(*requested.borrow(), vec![SortConfig::descending("name")]);
    assert_eq!(grid.current_sort(), Some(&SortConfig::ascending("name")));
}

#[test]
fn test_search_reports_text() {
    let searches = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&searches);
    let mut grid = Grid::new(columns(), GridMode::Root)
        .data(rows(2))
        .searchable(true)
        .search_value("pa")
        .on_search_change(move |value| sink.borrow_mut().push(value.to_string()));

    match grid.render().find(&grid.element_id("search")) {
        Some(Node::Input { value, .. }) => assert_eq!(value, "pa"),
        other => panic!("unexpected node {other:?}"),
    }
    assert!(grid.set_search("part").is_handled());
    assert_eq!(*searches.borrow(), vec!["part".to_string()]);
}

#[test]
fn test_press_row() {
    let clicked = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&clicked);
    let mut grid = Grid::new(columns(), GridMode::Root)
        .data(rows(2))
        .on_row_click(move |row: &Value, index| sink.borrow_mut().push((row["id"].clone(), index)));
    assert!(grid.press_row(1).is_handled());
    assert_eq!(grid.press_row(5), EventResult::Ignored);
    assert_eq!(*clicked.borrow(), vec![(json!(2), 1)]);
}

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn test_caller_owned_pagination_only_emits() {
    let requests = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&requests);
    let mut grid = Grid::new(columns(), GridMode::Root)
        .data(rows(10))
        .pagination(Pagination::new(1, 10, 37))
        .on_pagination_change(move |request| sink.borrow_mut().push(request));

    assert_eq!(grid.prev_page(), EventResult::Ignored);
    assert!(grid.next_page().is_handled());
    assert!(grid.last_page().is_handled());
    assert!(grid.set_page_size(25).is_handled());
    assert_eq!(
        *requests.borrow(),
        vec![
            PageRequest { page: 2, page_size: 10 },
            PageRequest { page: 4, page_size: 10 },
            PageRequest { page: 1, page_size: 25 },
        ]
    );
    assert_eq!(grid.current_pagination(), Some(Pagination::new(1, 10, 37)));

    let tree = grid.render();
    match tree.find(&grid.element_id("page-prev")) {
        Some(Node::Button { disabled, .. }) => assert!(*disabled),
        other => panic!("unexpected node {other:?}"),
    }
    assert!(tree.texts().contains(&"Page 1 of 4".to_string()));
}

// =============================================================================
// Row actions
// =============================================================================

#[test]
fn test_row_action_flow() {
    let archived = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&archived);
    let mut grid = Grid::new(columns(), GridMode::Root)
        .data(rows(2))
        .row_actions(vec![
            RowAction::new("Archive", move |row: &Value, index| {
                sink.borrow_mut().push((row["id"].clone(), index))
            }),
            RowAction::new("Delete", |_: &Value, _| {})
                .destructive()
                .disabled_if(|row: &Value| row["id"] == json!(2)),
        ]);

    let tree = grid.render();
    assert!(tree.find(&grid.element_id("actions-1")).is_some());
    assert!(tree.find(&grid.element_id("menu")).is_none());

    assert!(grid.open_action_menu(1).is_handled());
    let tree = grid.render();
    match tree.find(&grid.element_id("action-1")) {
        Some(Node::Button { disabled, .. }) => assert!(*disabled),
        other => panic!("unexpected node {other:?}"),
    }

    assert_eq!(grid.execute_action(1), EventResult::Ignored);
    assert!(grid.menu().is_open());

    assert!(grid.execute_action(0).is_handled());
    assert!(!grid.menu().is_open());
    assert_eq!(*archived.borrow(), vec![(json!(2), 1)]);
}

#[test]
fn test_actions_column_hosts_trigger() {
    let mut cols = columns();
    cols.push(Column::new("actions", "").kind(ColumnType::Actions));
    let grid = Grid::new(cols, GridMode::Root)
        .data(rows(1))
        .row_actions(vec![RowAction::new("Open", |_: &Value, _| {})]);
    let tree = grid.render();
    let row = tree.find(&grid.element_id("row-1")).unwrap();
    let cell = row.find_cell("actions").unwrap();
    assert_eq!(cell.id(), Some(grid.element_id("actions-1").as_str()));
    assert!(tree.find_cell("__actions").is_none());
}

#[test]
fn test_shrinking_data_closes_stale_menu() {
    let mut grid = Grid::new(columns(), GridMode::Root)
        .data(rows(3))
        .row_actions(vec![RowAction::new("Open", |_: &Value, _| {})]);
    grid.open_action_menu(2);
    grid.set_data(rows(1));
    assert!(!grid.menu().is_open());
}

#[test]
fn test_reordered_data_closes_menu_on_moved_target() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let mut grid = Grid::new(columns(), GridMode::Root)
        .data(vec![json!({"id": "a"}), json!({"id": "b"})])
        .row_actions(vec![RowAction::new("Delete", move |row: &Value, _| {
            sink.borrow_mut().push(row["id"].clone())
        })]);

    grid.open_action_menu(0);
    grid.set_data(vec![json!({"id": "b"}), json!({"id": "a"})]);
    assert!(!grid.menu().is_open());
    assert_eq!(grid.execute_action(0), EventResult::Ignored);
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_refreshed_data_keeps_menu_on_same_row() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let mut grid = Grid::new(columns(), GridMode::Root)
        .data(vec![json!({"id": "a"}), json!({"id": "b"})])
        .row_actions(vec![RowAction::new("Delete", move |row: &Value, _| {
            sink.borrow_mut().push(row["id"].clone())
        })]);

    grid.open_action_menu(1);
    grid.set_data(vec![json!({"id": "a", "name": "renamed"}), json!({"id": "b"})]);
    assert!(grid.menu().is_open());
    assert!(grid.execute_action(0).is_handled());
    assert_eq!(*calls.borrow(), vec![json!("b")]);
}

#[test]
fn test_unclamped_local_page_renders() {
    let mut grid = Grid::new(columns(), GridMode::Root)
        .data(rows(10))
        .pagination(Pagination::new(1, 5, 10))
        .local_pagination(true);

    assert!(grid.go_to_page(usize::MAX).is_handled());
    let tree = grid.render();
    assert!(tree.find(&grid.element_id("row-1")).is_none());
    assert!(tree.find(&grid.element_id("footer")).is_some());
}
