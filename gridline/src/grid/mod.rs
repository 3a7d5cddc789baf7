//! Grid composer.
//!
//! `Grid<T>` ties the column schema, the row data and the controllers
//! together. The host calls [`Grid::render`] to get a display tree and the
//! input handlers in `events` when the user interacts with it.
//!
//! Every grid is built in a [`GridMode`]: a root grid owns a scroll region
//! and the pagination footer, a child grid (the content of an expanded row
//! in some ancestor) has neither.
//!
//! State that the caller passed in at construction (selected rows, expanded
//! rows) stays caller-owned for the grid's lifetime and is updated through
//! the `set_*` methods; everything else is owned by the grid.
//!
//! # Example
//!
//! ```
//! use gridline::prelude::*;
//! use serde_json::json;
//!
//! let mut grid = Grid::new(
//!     vec![
//!         Column::new("name", "Name"),
//!         Column::new("price", "Price").kind(ColumnType::Money),
//!     ],
//!     GridMode::Root,
//! )
//! .data(vec![json!({"id": 1, "name": "Bolt", "price": 0.25})])
//! .selectable(true);
//!
//! grid.toggle_all();
//! assert_eq!(grid.selected_rows(), vec!["1".to_string()]);
//! assert!(grid.render().texts().contains(&"$0.25".to_string()));
//! ```

mod events;
mod render;

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::accessor::Record;
use crate::action_menu::{ActionMenu, RowAction};
use crate::column::Column;
use crate::config::GridConfig;
use crate::expansion::{ExpandableRows, ExpansionController};
use crate::identity::{RowId, RowIdentity};
use crate::pagination::{PageRequest, Pagination};
use crate::selection::{RowSelectability, SelectionController};
use crate::sort::SortConfig;

/// Unique identifier for a grid instance; prefixes every node id it emits.
///
/// Every `Grid::new` takes the next id, so a child grid rebuilt inside
/// `render_content` gets fresh node ids on each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(usize);

impl GridId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__grid_{}", self.0)
    }
}

/// Where the grid sits in a nesting hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMode {
    /// Top-level grid: owns scrolling and pagination.
    Root,
    /// Grid nested inside an expanded row of another grid.
    Child,
}

impl GridMode {
    pub fn is_child(self) -> bool {
        self == GridMode::Child
    }
}

type SelectionCallback = Box<dyn Fn(&HashSet<RowId>)>;
type SortCallback = Box<dyn Fn(&SortConfig)>;
type PaginationCallback = Box<dyn Fn(PageRequest)>;
type SearchCallback = Box<dyn Fn(&str)>;
type RowCallback<T> = Box<dyn Fn(&T, usize)>;

/// A hierarchical data grid over rows of type `T`.
pub struct Grid<T> {
    id: GridId,
    mode: GridMode,
    columns: Vec<Column<T>>,
    data: Vec<T>,
    config: GridConfig,
    identity: RowIdentity<T>,

    loading: bool,
    error: Option<String>,

    selectable: bool,
    selection: SelectionController<T>,
    on_selection_change: Option<SelectionCallback>,

    expandable: Option<ExpandableRows<T>>,
    expansion: ExpansionController<T>,

    row_actions: Vec<RowAction<T>>,
    menu: ActionMenu,

    sort: Option<SortConfig>,
    on_sort_change: Option<SortCallback>,

    pagination: Option<Pagination>,
    local_pagination: bool,
    on_pagination_change: Option<PaginationCallback>,

    searchable: bool,
    search_value: String,
    on_search_change: Option<SearchCallback>,

    on_refresh: Option<Box<dyn Fn()>>,
    on_row_click: Option<RowCallback<T>>,
}

impl<T> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("columns", &self.columns.len())
            .field("rows", &self.data.len())
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("selection", &self.selection)
            .field("expansion", &self.expansion)
            .field("menu", &self.menu)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}

impl<T: Record> Grid<T> {
    /// Create a grid. The mode is required: a nested grid must say so.
    pub fn new(columns: Vec<Column<T>>, mode: GridMode) -> Self {
        Self {
            id: GridId::new(),
            mode,
            columns,
            data: Vec::new(),
            config: GridConfig::default(),
            identity: RowIdentity::default(),
            loading: false,
            error: None,
            selectable: false,
            selection: SelectionController::uncontrolled(),
            on_selection_change: None,
            expandable: None,
            expansion: ExpansionController::uncontrolled(),
            row_actions: Vec::new(),
            menu: ActionMenu::new(),
            sort: None,
            on_sort_change: None,
            pagination: None,
            local_pagination: false,
            on_pagination_change: None,
            searchable: false,
            search_value: String::new(),
            on_search_change: None,
            on_refresh: None,
            on_row_click: None,
        }
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    pub fn data(mut self, data: Vec<T>) -> Self {
        self.data = data;
        self
    }

    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Replace the body with an error panel.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Make selection caller-owned, currently `ids`.
    pub fn with_selected_rows(mut self, ids: impl IntoIterator<Item = RowId>) -> Self {
        self.selection.make_controlled(ids);
        self
    }

    /// Restrict which rows may be selected. Accepts `bool` or
    /// [`RowSelectability`] results.
    pub fn row_selectable<R>(mut self, predicate: impl Fn(&T, usize) -> R + 'static) -> Self
    where
        R: Into<RowSelectability>,
    {
        self.selection
            .set_predicate(Some(Rc::new(move |row: &T, index: usize| -> RowSelectability {
                predicate(row, index).into()
            })));
        self
    }

    pub fn on_selection_change(mut self, callback: impl Fn(&HashSet<RowId>) + 'static) -> Self {
        self.on_selection_change = Some(Box::new(callback));
        self
    }

    /// Enable row expansion.
    pub fn expandable_rows(mut self, mut expandable: ExpandableRows<T>) -> Self {
        self.expansion = match expandable.expanded_rows.take() {
            Some(ids) => ExpansionController::controlled(ids),
            None => ExpansionController::uncontrolled(),
        };
        self.expansion.set_predicate(expandable.is_expandable.clone());
        self.expandable = Some(expandable);
        self
    }

    pub fn row_actions(mut self, actions: Vec<RowAction<T>>) -> Self {
        self.row_actions = actions;
        self
    }

    pub fn sort(mut self, sort: Option<SortConfig>) -> Self {
        self.sort = sort;
        self
    }

    pub fn on_sort_change(mut self, callback: impl Fn(&SortConfig) + 'static) -> Self {
        self.on_sort_change = Some(Box::new(callback));
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Let the grid slice `data` to the current page itself (and track page
    /// changes), instead of expecting the caller to pass one page of data.
    pub fn local_pagination(mut self, local: bool) -> Self {
        self.local_pagination = local;
        self
    }

    pub fn on_pagination_change(mut self, callback: impl Fn(PageRequest) + 'static) -> Self {
        self.on_pagination_change = Some(Box::new(callback));
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn search_value(mut self, value: impl Into<String>) -> Self {
        self.search_value = value.into();
        self
    }

    pub fn on_search_change(mut self, callback: impl Fn(&str) + 'static) -> Self {
        self.on_search_change = Some(Box::new(callback));
        self
    }

    pub fn on_refresh(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_refresh = Some(Box::new(callback));
        self
    }

    pub fn on_row_click(mut self, callback: impl Fn(&T, usize) + 'static) -> Self {
        self.on_row_click = Some(Box::new(callback));
        self
    }

    /// Derive row ids with `get` instead of the `id` field.
    pub fn row_id(mut self, get: impl Fn(&T, usize) -> RowId + 'static) -> Self {
        self.identity = RowIdentity::new(get);
        self
    }

    // -------------------------------------------------------------------------
    // Caller-owned updates (the next render's props)
    // -------------------------------------------------------------------------

    /// Replace the rows. An open action menu closes unless its target
    /// index still holds the row it was opened on.
    pub fn set_data(&mut self, data: Vec<T>) {
        if let Some(index) = self.menu.target_index() {
            let before = self.data.get(index).map(|row| self.identity.id(row, index));
            let after = data.get(index).map(|row| self.identity.id(row, index));
            if after.is_none() || before != after {
                log::debug!("Action menu target {index} changed, closing");
                self.menu.close();
            }
        }
        self.data = data;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Commit a caller-owned selection. Ignored if selection is grid-owned.
    pub fn set_selected_rows(&mut self, ids: impl IntoIterator<Item = RowId>) -> bool {
        self.selection.sync(ids)
    }

    /// Commit a caller-owned expanded set. Ignored if expansion is grid-owned.
    pub fn set_expanded_rows(&mut self, ids: impl IntoIterator<Item = RowId>) -> bool {
        self.expansion.sync(ids)
    }

    pub fn set_sort(&mut self, sort: Option<SortConfig>) {
        self.sort = sort;
    }

    pub fn set_pagination(&mut self, pagination: Option<Pagination>) {
        self.pagination = pagination;
    }

    pub fn set_search_value(&mut self, value: impl Into<String>) {
        self.search_value = value.into();
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn id(&self) -> GridId {
        self.id
    }

    /// Id of one of this grid's nodes, e.g. `element_id("select-all")`.
    pub fn element_id(&self, part: &str) -> String {
        format!("{}-{}", self.id, part)
    }

    pub fn mode(&self) -> GridMode {
        self.mode
    }

    pub fn rows(&self) -> &[T] {
        &self.data
    }

    pub fn config_ref(&self) -> &GridConfig {
        &self.config
    }

    /// Columns that take part in rendering.
    pub fn visible_columns(&self) -> impl Iterator<Item = &Column<T>> {
        self.columns.iter().filter(|column| !column.hidden)
    }

    /// Committed selection, sorted.
    pub fn selected_rows(&self) -> Vec<RowId> {
        self.selection.selected_sorted()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// Committed expanded set, sorted.
    pub fn expanded_rows(&self) -> Vec<RowId> {
        let mut ids: Vec<_> = self.expansion.expanded().iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expansion.is_expanded(id)
    }

    pub fn menu(&self) -> &ActionMenu {
        &self.menu
    }

    pub fn current_sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    pub fn current_pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// Index range of `data` that is rendered.
    pub fn visible_range(&self) -> Range<usize> {
        match (self.local_pagination, &self.pagination) {
            (true, Some(pagination)) => pagination.slice_range(self.data.len()),
            _ => 0..self.data.len(),
        }
    }

    /// Position of the row with `id` in `data`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.data
            .iter()
            .enumerate()
            .position(|(index, row)| self.identity.id(row, index) == id)
    }

    fn has_action_column(&self) -> bool {
        self.visible_columns()
            .any(|column| column.column_type() == Some(crate::column::ColumnType::Actions))
    }
}
