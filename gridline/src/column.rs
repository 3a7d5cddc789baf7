//! Column schema.
//!
//! A column's renderer is normalized when the column is built: either a
//! caller-supplied render function (full override) or a built-in type with an
//! optional formatter. The cell dispatcher matches on that once per cell and
//! never has to reconcile `render` against `type` at render time.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;
use crate::node::{Align, Node};

/// Custom cell renderer: `(value, row, index) -> node`.
pub type RenderFn<T> = Rc<dyn Fn(Option<&Value>, &T, usize) -> Node>;

/// Value formatter used by the built-in text and number renderers.
pub type FormatFn = Rc<dyn Fn(&Value) -> String>;

/// Column width specification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    /// Fixed width in cells.
    Fixed(u16),
    /// Percentage of the grid width.
    Percent(f32),
    /// Flexible width with weight.
    Flex(u16),
}

/// Built-in cell renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
    Boolean,
    Avatar,
    Chip,
    Money,
    Actions,
}

/// How a column's cells are produced.
pub enum CellKind<T> {
    /// Caller render function; output is used verbatim.
    Custom(RenderFn<T>),
    /// Built-in renderer for `ty`, with an optional formatter.
    Typed {
        ty: ColumnType,
        format: Option<FormatFn>,
    },
}

impl<T> Clone for CellKind<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Custom(render) => Self::Custom(Rc::clone(render)),
            Self::Typed { ty, format } => Self::Typed {
                ty: *ty,
                format: format.clone(),
            },
        }
    }
}

impl<T> fmt::Debug for CellKind<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(_) => write!(f, "Custom(...)"),
            Self::Typed { ty, format } => f
                .debug_struct("Typed")
                .field("ty", ty)
                .field("format", &format.as_ref().map(|_| "..."))
                .finish(),
        }
    }
}

/// A grid column definition.
///
/// # Examples
///
/// ```
/// use gridline::column::{Column, ColumnType};
/// use gridline::node::Align;
/// use serde_json::Value;
///
/// let columns: Vec<Column<Value>> = vec![
///     Column::new("sku", "SKU").fixed(10),
///     Column::new("vendor", "Vendor").accessor("vendor.name").sortable(),
///     Column::new("price", "Price").kind(ColumnType::Money).align(Align::Right),
/// ];
/// assert_eq!(columns[1].path(), "vendor.name");
/// ```
pub struct Column<T> {
    /// Unique identifier for this column.
    pub id: String,
    /// Header text.
    pub label: String,
    /// Dotted path into the row; `id` when absent.
    pub accessor_path: Option<String>,
    /// Width; the config default when absent.
    pub width: Option<ColumnWidth>,
    pub align: Align,
    pub sortable: bool,
    pub searchable: bool,
    /// Hidden columns are skipped entirely.
    pub hidden: bool,
    pub kind: CellKind<T>,
}

impl<T> Column<T> {
    /// Create a text column.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            accessor_path: None,
            width: None,
            align: Align::Left,
            sortable: false,
            searchable: true,
            hidden: false,
            kind: CellKind::Typed {
                ty: ColumnType::Text,
                format: None,
            },
        }
    }

    /// Read values from `path` instead of the column id.
    pub fn accessor(mut self, path: impl Into<String>) -> Self {
        self.accessor_path = Some(path.into());
        self
    }

    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }

    /// Set a fixed width for this column.
    pub fn fixed(self, width: u16) -> Self {
        self.width(ColumnWidth::Fixed(width))
    }

    /// Set a flex width for this column.
    pub fn flex(self, weight: u16) -> Self {
        self.width(ColumnWidth::Flex(weight))
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Use a built-in renderer. Ignored once a custom renderer is set.
    pub fn kind(mut self, ty: ColumnType) -> Self {
        if let CellKind::Typed { ty: current, .. } = &mut self.kind {
            *current = ty;
        }
        self
    }

    /// Format values for text and number cells. Ignored once a custom
    /// renderer is set.
    pub fn format(mut self, format: impl Fn(&Value) -> String + 'static) -> Self {
        if let CellKind::Typed { format: current, .. } = &mut self.kind {
            *current = Some(Rc::new(format));
        }
        self
    }

    /// Render cells with `render`, overriding any built-in type.
    pub fn render(mut self, render: impl Fn(Option<&Value>, &T, usize) -> Node + 'static) -> Self {
        self.kind = CellKind::Custom(Rc::new(render));
        self
    }

    /// The accessor path used to read this column's values.
    pub fn path(&self) -> &str {
        self.accessor_path.as_deref().unwrap_or(&self.id)
    }

    /// The built-in type, or `None` for custom columns.
    pub fn column_type(&self) -> Option<ColumnType> {
        match &self.kind {
            CellKind::Typed { ty, .. } => Some(*ty),
            CellKind::Custom(_) => None,
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            accessor_path: self.accessor_path.clone(),
            width: self.width,
            align: self.align,
            sortable: self.sortable,
            searchable: self.searchable,
            hidden: self.hidden,
            kind: self.kind.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("accessor_path", &self.accessor_path)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("hidden", &self.hidden)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Serializable column description, for schemas kept in data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub accessor_path: Option<String>,
    #[serde(default)]
    pub width: Option<ColumnWidth>,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default = "default_searchable")]
    pub searchable: bool,
    #[serde(default, rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub hidden: bool,
}

fn default_searchable() -> bool {
    true
}

impl<T> From<ColumnSpec> for Column<T> {
    fn from(spec: ColumnSpec) -> Self {
        Self {
            id: spec.id,
            label: spec.label,
            accessor_path: spec.accessor_path,
            width: spec.width,
            align: spec.align,
            sortable: spec.sortable,
            searchable: spec.searchable,
            hidden: spec.hidden,
            kind: CellKind::Typed {
                ty: spec.column_type,
                format: None,
            },
        }
    }
}

/// Parse a JSON array of column specs, rejecting duplicate ids.
pub fn parse_schema(json: &str) -> Result<Vec<ColumnSpec>, SchemaError> {
    let specs: Vec<ColumnSpec> = serde_json::from_str(json)?;
    validate_schema(&specs)?;
    Ok(specs)
}

/// Check that column ids are unique.
pub fn validate_schema(specs: &[ColumnSpec]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for spec in specs {
        if !seen.insert(spec.id.as_str()) {
            return Err(SchemaError::duplicate(&spec.id));
        }
    }
    log::debug!("Loaded schema with {} columns", specs.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_overrides_type() {
        let column: Column<Value> = Column::new("qty", "Qty")
            .kind(ColumnType::Number)
            .render(|_, _, _| Node::text("custom"))
            .kind(ColumnType::Money);
        assert!(matches!(column.kind, CellKind::Custom(_)));
        assert_eq!(column.column_type(), None);
    }

    #[test]
    fn test_path_defaults_to_id() {
        let column: Column<Value> = Column::new("name", "Name");
        assert_eq!(column.path(), "name");
    }

    #[test]
    fn test_parse_schema() {
        let specs = parse_schema(
            r#"[
                {"id": "name", "label": "Name", "sortable": true},
                {"id": "price", "label": "Price", "type": "money",
                 "width": {"fixed": 10}, "align": "right"},
                {"id": "internal", "label": "Internal", "hidden": true, "searchable": false}
            ]"#,
        )
        .unwrap();
        assert_eq!(specs.len(), 3);
        assert!(specs[0].searchable);
        assert_eq!(specs[1].column_type, ColumnType::Money);
        assert_eq!(specs[1].width, Some(ColumnWidth::Fixed(10)));
        assert_eq!(specs[1].align, Align::Right);
        assert!(specs[2].hidden);
        assert!(!specs[2].searchable);
    }

    #[test]
    fn test_parse_schema_rejects_duplicates() {
        let err = parse_schema(r#"[{"id": "a", "label": "A"}, {"id": "a", "label": "B"}]"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateColumn { ref id } if id == "a"));
    }
}
