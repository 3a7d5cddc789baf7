//! Dotted-path access into row records.

use serde_json::Value;

/// A row record the grid can read through dotted accessor paths.
///
/// The grid never mutates records. Implement this for typed rows, or use
/// `serde_json::Value` directly.
pub trait Record {
    /// Resolve `path` (e.g. `"vendor.name"`) to a leaf value.
    ///
    /// Absence is a normal outcome and must not panic.
    fn resolve(&self, path: &str) -> Option<Value>;
}

impl Record for Value {
    fn resolve(&self, path: &str) -> Option<Value> {
        resolve(self, path).cloned()
    }
}

/// Walk `path` through `row`.
///
/// Objects are indexed by key and arrays by numeric segment. A missing or
/// `null` intermediate short-circuits to `None`. A `null` leaf is returned
/// as-is; renderers treat it like absence.
///
/// ```
/// use serde_json::json;
/// use gridline::accessor::resolve;
///
/// let row = json!({"a": {"b": 5}});
/// assert_eq!(resolve(&row, "a.b"), Some(&json!(5)));
/// assert_eq!(resolve(&row, "a.c"), None);
/// ```
pub fn resolve<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = row;
    for segment in path.split('.') {
        if segment.is_empty() {
            return None;
        }
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// True when `value` should be rendered as a fallback.
pub fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Stringify a leaf value for display.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Truthiness with the usual scripting rules: `false`, `0`, `NaN`, `""`,
/// `null` and absence are falsy; everything else is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
