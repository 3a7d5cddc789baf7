//! Row expansion.
//!
//! Tracks which rows are expanded and reports each toggle as an
//! [`ExpansionChange`], so callers see exactly what changed. Expanded content
//! is whatever the caller renders for the row; it may be another grid in
//! child mode, nested as deep as the caller's data goes.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::accessor::Record;
use crate::controlled::Controlled;
use crate::identity::RowId;
use crate::node::Node;

/// Result of one expansion toggle, reflecting the state after the toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionChange {
    /// The full expanded set after the toggle.
    pub expanded: HashSet<RowId>,
    pub changed_row_id: RowId,
    pub is_expanded: bool,
}

/// Callback for expansion changes.
pub type ExpansionCallback = Box<dyn Fn(&ExpansionChange)>;

/// Owns "which rows are expanded".
pub struct ExpansionController<T> {
    state: Controlled<HashSet<RowId>>,
    is_expandable: Option<Rc<dyn Fn(&T, usize) -> bool>>,
}

impl<T> fmt::Debug for ExpansionController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpansionController")
            .field("state", &self.state)
            .field("is_expandable", &self.is_expandable.is_some())
            .finish()
    }
}

impl<T> Default for ExpansionController<T> {
    fn default() -> Self {
        Self {
            state: Controlled::default(),
            is_expandable: None,
        }
    }
}

impl<T: Record> ExpansionController<T> {
    /// Expansion owned by the controller.
    pub fn uncontrolled() -> Self {
        Self::default()
    }

    /// Expansion owned by the caller, currently `ids`.
    pub fn controlled(ids: impl IntoIterator<Item = RowId>) -> Self {
        Self {
            state: Controlled::controlled(ids.into_iter().collect()),
            is_expandable: None,
        }
    }

    /// Gate which rows can be expanded.
    pub fn with_predicate(mut self, is_expandable: impl Fn(&T, usize) -> bool + 'static) -> Self {
        self.is_expandable = Some(Rc::new(is_expandable));
        self
    }

    pub(crate) fn set_predicate(&mut self, is_expandable: Option<Rc<dyn Fn(&T, usize) -> bool>>) {
        self.is_expandable = is_expandable;
    }

    pub fn is_controlled(&self) -> bool {
        self.state.is_controlled()
    }

    pub fn is_expandable(&self, row: &T, index: usize) -> bool {
        self.is_expandable
            .as_ref()
            .is_none_or(|predicate| predicate(row, index))
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.state.get().contains(id)
    }

    /// The committed expanded set.
    pub fn expanded(&self) -> &HashSet<RowId> {
        self.state.get()
    }

    /// Commit a caller-owned expanded set.
    pub fn sync(&mut self, ids: impl IntoIterator<Item = RowId>) -> bool {
        self.state.sync(ids.into_iter().collect())
    }

    /// Flip `id`'s membership.
    pub fn toggle(&mut self, id: &str) -> ExpansionChange {
        let mut next = self.state.get().clone();
        let is_expanded = if next.remove(id) {
            false
        } else {
            next.insert(id.to_string());
            true
        };
        log::debug!("Expansion row {id} -> {is_expanded}");
        ExpansionChange {
            expanded: self.state.request_change(next),
            changed_row_id: id.to_string(),
            is_expanded,
        }
    }

    /// Flip `row`'s membership if it is expandable.
    pub fn toggle_row(&mut self, row: &T, index: usize, id: &str) -> Option<ExpansionChange> {
        if !self.is_expandable(row, index) {
            log::debug!("Ignoring expansion toggle for non-expandable row {id}");
            return None;
        }
        Some(self.toggle(id))
    }
}

/// Expandable-row configuration for a grid.
pub struct ExpandableRows<T> {
    pub(crate) render_content: Box<dyn Fn(&T, usize) -> Node>,
    pub(crate) is_expandable: Option<Rc<dyn Fn(&T, usize) -> bool>>,
    pub(crate) expanded_rows: Option<Vec<RowId>>,
    pub(crate) on_change: Option<ExpansionCallback>,
}

impl<T> ExpandableRows<T> {
    /// Expand rows into the content produced by `render_content`.
    pub fn new(render_content: impl Fn(&T, usize) -> Node + 'static) -> Self {
        Self {
            render_content: Box::new(render_content),
            is_expandable: None,
            expanded_rows: None,
            on_change: None,
        }
    }

    /// Only rows passing `predicate` get a disclosure control.
    pub fn expandable_if(mut self, predicate: impl Fn(&T, usize) -> bool + 'static) -> Self {
        self.is_expandable = Some(Rc::new(predicate));
        self
    }

    /// Make expansion caller-owned, starting from `ids`.
    pub fn expanded_rows(mut self, ids: impl IntoIterator<Item = RowId>) -> Self {
        self.expanded_rows = Some(ids.into_iter().collect());
        self
    }

    pub fn on_expanded_rows_change(
        mut self,
        callback: impl Fn(&ExpansionChange) + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }
}

impl<T> fmt::Debug for ExpandableRows<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandableRows")
            .field("expanded_rows", &self.expanded_rows)
            .finish_non_exhaustive()
    }
}
