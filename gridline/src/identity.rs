//! Row identity.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::accessor::Record;

/// Stable row identifier used for selection and expansion tracking.
pub type RowId = String;

/// Derives a [`RowId`] for each row.
///
/// Uses the caller's function when set, otherwise the row's `id` field
/// (string or number) and finally the row index. Ids must be unique within
/// the data handed to one render pass; this is not checked.
pub struct RowIdentity<T> {
    get: Option<Rc<dyn Fn(&T, usize) -> RowId>>,
}

impl<T> Default for RowIdentity<T> {
    fn default() -> Self {
        Self { get: None }
    }
}

impl<T> Clone for RowIdentity<T> {
    fn clone(&self) -> Self {
        Self {
            get: self.get.clone(),
        }
    }
}

impl<T> fmt::Debug for RowIdentity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowIdentity")
            .field("custom", &self.get.is_some())
            .finish()
    }
}

impl<T: Record> RowIdentity<T> {
    pub fn new(get: impl Fn(&T, usize) -> RowId + 'static) -> Self {
        Self {
            get: Some(Rc::new(get)),
        }
    }

    /// The id of `row` at `index`.
    pub fn id(&self, row: &T, index: usize) -> RowId {
        if let Some(get) = &self.get {
            return get(row, index);
        }
        match row.resolve("id") {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => index.to_string(),
        }
    }

    /// Ids for every row in `data`, in order.
    pub fn ids(&self, data: &[T]) -> Vec<RowId> {
        data.iter()
            .enumerate()
            .map(|(index, row)| self.id(row, index))
            .collect()
    }
}
