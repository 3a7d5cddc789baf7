//! Display tree emitted by the grid.
//!
//! A `Node` is a toolkit-neutral description of what to draw. Hosts map each
//! variant onto their own widgets; [`text::render_lines`] maps it onto plain
//! terminal lines.

mod layout;
mod style;
pub mod text;

pub use layout::{Align, Border, Layout, Size};
pub use style::{Style, Tone};

/// Tri-state value of a checkbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckState {
    #[default]
    Unchecked,
    /// Some but not all of the governed rows are checked.
    Partial,
    Checked,
}

/// A node in the display tree
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Node {
    /// Empty node (renders nothing)
    #[default]
    Empty,

    /// Text content
    Text { content: String, style: Style },

    /// Container with vertical layout
    Column {
        id: String,
        children: Vec<Node>,
        style: Style,
        layout: Layout,
    },

    /// Container with horizontal layout
    Row {
        id: String,
        children: Vec<Node>,
        style: Style,
        layout: Layout,
    },

    /// One grid cell
    Cell {
        column_id: String,
        child: Box<Node>,
        layout: Layout,
    },

    /// Scroll region owned by a root grid
    Scroll { id: String, child: Box<Node> },

    /// Selection checkbox
    Checkbox {
        id: String,
        state: CheckState,
        disabled: bool,
        /// Why the checkbox is disabled, if the caller said so.
        hint: Option<String>,
    },

    /// Expand/collapse affordance
    Disclosure {
        id: String,
        expanded: bool,
        indicator: char,
    },

    /// Small labelled badge
    Badge { label: String, tone: Tone },

    /// Image with an initials fallback
    Avatar {
        source: Option<String>,
        initials: String,
    },

    /// Pressable button
    Button {
        id: String,
        label: String,
        disabled: bool,
        style: Style,
    },

    /// Text input
    Input {
        id: String,
        value: String,
        placeholder: String,
    },

    /// Busy indicator
    Spinner { label: String },

    /// Floating layer anchored to a row (action menus)
    Overlay {
        id: String,
        anchor: String,
        children: Vec<Node>,
    },
}

impl Node {
    /// Create an empty node
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            style: Style::new(),
        }
    }

    /// Create a text node with style
    pub fn text_styled(content: impl Into<String>, style: Style) -> Self {
        Self::Text {
            content: content.into(),
            style,
        }
    }

    /// Create a column node
    pub fn column(children: Vec<Node>) -> Self {
        Self::Column {
            id: String::new(),
            children,
            style: Style::new(),
            layout: Layout::default(),
        }
    }

    /// Create a column node with an id, style and layout
    pub fn column_styled(
        id: impl Into<String>,
        children: Vec<Node>,
        style: Style,
        layout: Layout,
    ) -> Self {
        Self::Column {
            id: id.into(),
            children,
            style,
            layout,
        }
    }

    /// Create a row node
    pub fn row(children: Vec<Node>) -> Self {
        Self::Row {
            id: String::new(),
            children,
            style: Style::new(),
            layout: Layout::default(),
        }
    }

    /// Create a row node with an id, style and layout
    pub fn row_styled(
        id: impl Into<String>,
        children: Vec<Node>,
        style: Style,
        layout: Layout,
    ) -> Self {
        Self::Row {
            id: id.into(),
            children,
            style,
            layout,
        }
    }

    /// Create a button node
    pub fn button(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Button {
            id: id.into(),
            label: label.into(),
            disabled: false,
            style: Style::new(),
        }
    }

    /// Create a badge node
    pub fn badge(label: impl Into<String>, tone: Tone) -> Self {
        Self::Badge {
            label: label.into(),
            tone,
        }
    }

    /// Check if node is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Get the node ID if any
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Column { id, .. }
            | Self::Row { id, .. }
            | Self::Scroll { id, .. }
            | Self::Checkbox { id, .. }
            | Self::Disclosure { id, .. }
            | Self::Button { id, .. }
            | Self::Input { id, .. }
            | Self::Overlay { id, .. } => {
                if id.is_empty() {
                    None
                } else {
                    Some(id.as_str())
                }
            }
            _ => None,
        }
    }

    /// Direct children of this node.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Column { children, .. }
            | Self::Row { children, .. }
            | Self::Overlay { children, .. } => children,
            Self::Cell { child, .. } | Self::Scroll { child, .. } => std::slice::from_ref(child),
            _ => &[],
        }
    }

    /// Find a node by ID in the tree (depth first).
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    /// Find a cell by column id inside this subtree.
    pub fn find_cell(&self, column_id: &str) -> Option<&Node> {
        if let Self::Cell { column_id: cid, child, .. } = self
            && cid == column_id
        {
            return Some(child);
        }
        self.children()
            .iter()
            .find_map(|child| child.find_cell(column_id))
    }

    /// Count the nodes in this subtree matching `pred`.
    pub fn count(&self, pred: &dyn Fn(&Node) -> bool) -> usize {
        let own = usize::from(pred(self));
        own + self
            .children()
            .iter()
            .map(|child| child.count(pred))
            .sum::<usize>()
    }

    /// All text content in this subtree, in document order.
    ///
    /// Badges, buttons and spinners contribute their labels.
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts(&self, out: &mut Vec<String>) {
        match self {
            Self::Text { content, .. } => out.push(content.clone()),
            Self::Badge { label, .. }
            | Self::Button { label, .. }
            | Self::Spinner { label } => out.push(label.clone()),
            _ => {}
        }
        for child in self.children() {
            child.collect_texts(out);
        }
    }
}
