//! Column sorting.
//!
//! The grid only reports sort requests; ordering the data is the caller's
//! job. [`sorted_indices`] is provided for callers that sort locally.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::accessor::{Record, stringify};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Header glyph.
    pub fn indicator(self) -> char {
        match self {
            Self::Ascending => '▲',
            Self::Descending => '▼',
        }
    }
}

/// Current sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Sort after pressing `column_id`'s header: the same column flips
    /// direction, a different column starts ascending.
    pub fn next(current: Option<&SortConfig>, column_id: &str) -> SortConfig {
        match current {
            Some(sort) if sort.column_id == column_id => SortConfig {
                column_id: sort.column_id.clone(),
                direction: sort.direction.reversed(),
            },
            _ => SortConfig::ascending(column_id),
        }
    }
}

/// Order of `rows` sorted by the value at `path`.
///
/// Numbers compare numerically, strings case-insensitively, booleans with
/// `false` first. Absent values always sort last regardless of direction.
/// The sort is stable.
pub fn sorted_indices<T: Record>(rows: &[T], path: &str, direction: SortDirection) -> Vec<usize> {
    let keys: Vec<Option<Value>> = rows
        .iter()
        .map(|row| row.resolve(path).filter(|v| !v.is_null()))
        .collect();
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| match (&keys[a], &keys[b]) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ord = compare_values(x, y);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    });
    order
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.total_cmp(&y)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        _ => stringify(a).cmp(&stringify(b)),
    }
}
