//! Row selection.
//!
//! Selection is a set of row ids, owned either by the grid or by the caller
//! (see [`Controlled`]). Rows whose selectability predicate is false never
//! appear in a set this controller produces.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::accessor::Record;
use crate::controlled::Controlled;
use crate::identity::{RowId, RowIdentity};
use crate::node::CheckState;

/// Whether a row may be selected, with an optional explanation for the UI.
///
/// The reason never affects membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSelectability {
    pub condition: bool,
    pub reason: Option<String>,
}

impl RowSelectability {
    pub fn allowed() -> Self {
        Self {
            condition: true,
            reason: None,
        }
    }

    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            condition: false,
            reason: Some(reason.into()),
        }
    }
}

impl From<bool> for RowSelectability {
    fn from(condition: bool) -> Self {
        Self {
            condition,
            reason: None,
        }
    }
}

/// Per-row selectability predicate.
pub type SelectablePredicate<T> = Rc<dyn Fn(&T, usize) -> RowSelectability>;

/// Owns "which rows are selected".
pub struct SelectionController<T> {
    state: Controlled<HashSet<RowId>>,
    predicate: Option<SelectablePredicate<T>>,
}

impl<T> fmt::Debug for SelectionController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionController")
            .field("state", &self.state)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

impl<T> Default for SelectionController<T> {
    fn default() -> Self {
        Self {
            state: Controlled::default(),
            predicate: None,
        }
    }
}

impl<T: Record> SelectionController<T> {
    /// Selection owned by the controller.
    pub fn uncontrolled() -> Self {
        Self::default()
    }

    /// Selection owned by the caller, currently `ids`.
    pub fn controlled(ids: impl IntoIterator<Item = RowId>) -> Self {
        Self {
            state: Controlled::controlled(ids.into_iter().collect()),
            predicate: None,
        }
    }

    /// Restrict which rows may be selected.
    pub fn with_predicate<R>(mut self, predicate: impl Fn(&T, usize) -> R + 'static) -> Self
    where
        R: Into<RowSelectability>,
    {
        self.predicate = Some(Rc::new(move |row: &T, index: usize| -> RowSelectability {
            predicate(row, index).into()
        }));
        self
    }

    /// Hand ownership of the selection to the caller, keeping the predicate.
    pub(crate) fn make_controlled(&mut self, ids: impl IntoIterator<Item = RowId>) {
        self.state = Controlled::controlled(ids.into_iter().collect());
    }

    pub(crate) fn set_predicate(&mut self, predicate: Option<SelectablePredicate<T>>) {
        self.predicate = predicate;
    }

    pub fn is_controlled(&self) -> bool {
        self.state.is_controlled()
    }

    /// Selectability of `row`, including the UI reason.
    pub fn selectability(&self, row: &T, index: usize) -> RowSelectability {
        match &self.predicate {
            Some(predicate) => predicate(row, index),
            None => RowSelectability::allowed(),
        }
    }

    pub fn is_selectable(&self, row: &T, index: usize) -> bool {
        self.selectability(row, index).condition
    }

    /// The committed selection.
    pub fn selected(&self) -> &HashSet<RowId> {
        self.state.get()
    }

    /// The committed selection, sorted for deterministic output.
    pub fn selected_sorted(&self) -> Vec<RowId> {
        let mut ids: Vec<_> = self.state.get().iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.state.get().contains(id)
    }

    /// Commit a caller-owned selection.
    pub fn sync(&mut self, ids: impl IntoIterator<Item = RowId>) -> bool {
        self.state.sync(ids.into_iter().collect())
    }

    /// Toggle every selectable row among `rows` (pairs of index and row).
    ///
    /// When all selectable rows are already selected they are removed,
    /// otherwise they are added. Ids of rows outside `rows` are kept, so a
    /// selection spanning several pages survives toggling one page. Returns
    /// the new set (post-toggle) for emission.
    pub fn toggle_all<'r>(
        &mut self,
        rows: impl IntoIterator<Item = (usize, &'r T)>,
        identity: &RowIdentity<T>,
    ) -> HashSet<RowId>
    where
        T: 'r,
    {
        let mut selectable = Vec::new();
        let mut blocked = Vec::new();
        for (index, row) in rows {
            let id = identity.id(row, index);
            if self.is_selectable(row, index) {
                selectable.push(id);
            } else {
                blocked.push(id);
            }
        }

        let current = self.state.get();
        let all_selected =
            !selectable.is_empty() && selectable.iter().all(|id| current.contains(id));

        let mut next = current.clone();
        for id in &blocked {
            next.remove(id);
        }
        if all_selected {
            for id in &selectable {
                next.remove(id);
            }
        } else {
            next.extend(selectable);
        }

        log::debug!(
            "Selection toggle-all: {} -> {} rows ({})",
            current.len(),
            next.len(),
            if all_selected { "cleared" } else { "selected" }
        );
        self.state.request_change(next)
    }

    /// Toggle every selectable row in `data`, indexed from zero.
    pub fn toggle_all_in(&mut self, data: &[T], identity: &RowIdentity<T>) -> HashSet<RowId> {
        self.toggle_all(data.iter().enumerate(), identity)
    }

    /// Set one row's membership. Returns `None` (and emits nothing) when the
    /// row is not selectable.
    pub fn toggle_row(
        &mut self,
        row: &T,
        index: usize,
        id: &str,
        checked: bool,
    ) -> Option<HashSet<RowId>> {
        if !self.is_selectable(row, index) {
            log::debug!("Ignoring selection toggle for unselectable row {id}");
            return None;
        }
        let mut next = self.state.get().clone();
        if checked {
            next.insert(id.to_string());
        } else {
            next.remove(id);
        }
        log::debug!("Selection row {id} -> {checked}");
        Some(self.state.request_change(next))
    }

    /// Header checkbox state over the selectable rows among `rows`.
    pub fn header_state<'r>(
        &self,
        rows: impl IntoIterator<Item = (usize, &'r T)>,
        identity: &RowIdentity<T>,
    ) -> CheckState
    where
        T: 'r,
    {
        let current = self.state.get();
        let (mut total, mut selected) = (0usize, 0usize);
        for (index, row) in rows {
            if !self.is_selectable(row, index) {
                continue;
            }
            total += 1;
            if current.contains(&identity.id(row, index)) {
                selected += 1;
            }
        }
        match selected {
            0 => CheckState::Unchecked,
            n if n == total => CheckState::Checked,
            _ => CheckState::Partial,
        }
    }
}
