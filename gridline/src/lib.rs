//! Headless hierarchical data grid.
//!
//! A [`Grid`](grid::Grid) takes a column schema, row records and optional
//! caller-owned state, and produces a [`Node`](node::Node) display tree.
//! Rows can expand into arbitrary content, including another grid in
//! [`GridMode::Child`](grid::GridMode::Child).

pub mod accessor;
pub mod action_menu;
pub mod cell;
pub mod column;
pub mod config;
pub mod controlled;
pub mod error;
pub mod events;
pub mod expansion;
pub mod grid;
pub mod identity;
pub mod node;
pub mod pagination;
pub mod search;
pub mod selection;
pub mod sort;

pub use accessor::Record;
pub use action_menu::{ActionMenu, RowAction};
pub use cell::CellRenderer;
pub use column::{
    CellKind, Column, ColumnSpec, ColumnType, ColumnWidth, parse_schema, validate_schema,
};
pub use config::GridConfig;
pub use controlled::{Controlled, Source};
pub use error::{ConfigError, SchemaError};
pub use events::EventResult;
pub use expansion::{ExpandableRows, ExpansionChange, ExpansionController};
pub use grid::{Grid, GridId, GridMode};
pub use identity::{RowId, RowIdentity};
pub use node::{Align, CheckState, Node, Style, Tone};
pub use pagination::{PageInfo, PageRequest, Pagination, PaginationController};
pub use selection::{RowSelectability, SelectionController};
pub use sort::{SortConfig, SortDirection};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::accessor::Record;
    pub use crate::action_menu::RowAction;
    pub use crate::column::{Column, ColumnType, ColumnWidth};
    pub use crate::config::GridConfig;
    pub use crate::events::EventResult;
    pub use crate::expansion::{ExpandableRows, ExpansionChange};
    pub use crate::grid::{Grid, GridMode};
    pub use crate::identity::RowId;
    pub use crate::node::{Align, CheckState, Node, Style, Tone};
    pub use crate::pagination::{PageRequest, Pagination};
    pub use crate::selection::RowSelectability;
    pub use crate::sort::{SortConfig, SortDirection};
}
