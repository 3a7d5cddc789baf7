//! Layout hints attached to display nodes.
//!
//! The grid does not lay anything out itself; these are hints for the host
//! toolkit (and for the plain-text renderer in [`super::text`]).

use serde::{Deserialize, Serialize};

/// Horizontal alignment of cell content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Border style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Border {
    #[default]
    None,
    /// Single line on the leading edge, used to mark nested content.
    Leading,
    Single,
}

/// Size specification
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Size {
    /// Fixed size in cells
    Fixed(u16),
    /// Percentage of parent
    Percent(f32),
    /// Flex grow factor
    Flex(u16),
    /// Auto size based on content
    #[default]
    Auto,
}

/// Layout properties for a node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    /// Width
    pub width: Size,
    /// Content alignment inside the node
    pub align: Align,
    /// Leading indent in cells
    pub indent: u16,
    /// Gap between children
    pub gap: u16,
    /// Border style
    pub border: Border,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: Size) -> Self {
        self.width = width;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }
}
