//! Per-row action menu.
//!
//! Actions are plain descriptors holding their handler; the grid refers to
//! them by position in its action list, never by a string key.

use std::fmt;
use std::rc::Rc;

use crate::node::Tone;

/// One entry in the row action menu.
pub struct RowAction<T> {
    pub label: String,
    pub icon: Option<String>,
    pub tone: Option<Tone>,
    handler: Rc<dyn Fn(&T, usize)>,
    disabled: Option<Rc<dyn Fn(&T) -> bool>>,
}

impl<T> RowAction<T> {
    pub fn new(label: impl Into<String>, handler: impl Fn(&T, usize) + 'static) -> Self {
        Self {
            label: label.into(),
            icon: None,
            tone: None,
            handler: Rc::new(handler),
            disabled: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Mark the action as destructive (rendered with the danger tone).
    pub fn destructive(mut self) -> Self {
        self.tone = Some(Tone::Danger);
        self
    }

    /// Disable the action for rows matching `predicate`. Disabled actions
    /// stay visible so the menu layout is the same for every row.
    pub fn disabled_if(mut self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.disabled = Some(Rc::new(predicate));
        self
    }

    pub fn is_disabled(&self, row: &T) -> bool {
        self.disabled.as_ref().is_some_and(|predicate| predicate(row))
    }
}

impl<T> Clone for RowAction<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            icon: self.icon.clone(),
            tone: self.tone,
            handler: Rc::clone(&self.handler),
            disabled: self.disabled.clone(),
        }
    }
}

impl<T> fmt::Debug for RowAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction")
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("tone", &self.tone)
            .finish_non_exhaustive()
    }
}

/// Transient menu state. Never caller-owned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionMenu {
    target: Option<usize>,
}

impl ActionMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    /// Index of the row the menu was opened for.
    pub fn target_index(&self) -> Option<usize> {
        self.target
    }

    /// Open the menu for the row at `index`.
    pub fn open(&mut self, index: usize) {
        log::debug!("Action menu opened for row {index}");
        self.target = Some(index);
    }

    pub fn close(&mut self) {
        self.target = None;
    }

    /// Run `action` against the target row, then close.
    ///
    /// Returns `false` without doing anything if the menu is closed or the
    /// action is disabled for the row (the menu stays open). A target that
    /// no longer exists in `data` closes the menu.
    pub fn execute<T>(&mut self, action: &RowAction<T>, data: &[T]) -> bool {
        let Some(index) = self.target else {
            log::warn!("Action '{}' executed with no open menu", action.label);
            return false;
        };
        let Some(row) = data.get(index) else {
            log::warn!("Action menu target {index} is gone, closing");
            self.close();
            return false;
        };
        if action.is_disabled(row) {
            log::debug!("Action '{}' is disabled for row {index}", action.label);
            return false;
        }
        log::debug!("Executing action '{}' on row {index}", action.label);
        (action.handler)(row, index);
        self.close();
        true
    }
}
