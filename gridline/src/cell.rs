//! Cell renderer dispatch.
//!
//! Every branch tolerates an absent value and degrades to the configured
//! fallback token; nothing here can fail.

use std::fmt::Write as _;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::accessor::{is_absent, is_truthy, stringify};
use crate::column::{CellKind, Column, ColumnType, FormatFn};
use crate::config::GridConfig;
use crate::node::{Node, Style, Tone};

const FALLBACK_DATE_FORMAT: &str = "%m/%d/%Y";

/// Maps a column's renderer to a display node for one cell.
#[derive(Debug, Clone, Copy)]
pub struct CellRenderer<'a> {
    config: &'a GridConfig,
}

impl<'a> CellRenderer<'a> {
    pub fn new(config: &'a GridConfig) -> Self {
        Self { config }
    }

    /// Render one cell.
    ///
    /// Custom renderers are called and returned verbatim. `Actions` columns
    /// render nothing here; the grid places the row-action trigger in them.
    pub fn render<T>(
        &self,
        column: &Column<T>,
        value: Option<&Value>,
        row: &T,
        index: usize,
    ) -> Node {
        match &column.kind {
            CellKind::Custom(render) => render(value, row, index),
            CellKind::Typed { ty, format } => self.render_typed(*ty, format.as_ref(), value),
        }
    }

    fn render_typed(
        &self,
        ty: ColumnType,
        format: Option<&FormatFn>,
        value: Option<&Value>,
    ) -> Node {
        match ty {
            ColumnType::Avatar => self.avatar(value),
            ColumnType::Chip => match present(value) {
                Some(v) => Node::badge(stringify(v), Tone::Info),
                None => self.fallback(),
            },
            ColumnType::Boolean => {
                if is_truthy(value) {
                    Node::badge(&self.config.yes_label, Tone::Success)
                } else {
                    Node::badge(&self.config.no_label, Tone::Neutral)
                }
            }
            ColumnType::Date => match present(value) {
                Some(v) => Node::text(self.format_date(v)),
                None => self.fallback(),
            },
            ColumnType::Number => match (present(value), format) {
                (None, _) => self.fallback(),
                (Some(v), Some(format)) => Node::text(format(v)),
                (Some(Value::Number(n)), None) => Node::text(format_number(n)),
                (Some(v), None) => Node::text(stringify(v)),
            },
            ColumnType::Money => match present(value) {
                Some(v) => Node::text(self.format_money(v)),
                None => self.fallback(),
            },
            ColumnType::Actions => Node::Empty,
            ColumnType::Text => match (present(value), format) {
                (None, _) => self.fallback(),
                (Some(v), Some(format)) => Node::text(format(v)),
                (Some(v), None) => Node::text(stringify(v)),
            },
        }
    }

    /// The fallback cell.
    pub fn fallback(&self) -> Node {
        Node::text_styled(&self.config.fallback_token, Style::new().fg(Tone::Muted))
    }

    fn avatar(&self, value: Option<&Value>) -> Node {
        match present(value) {
            Some(Value::String(s)) if is_url_like(s) => Node::Avatar {
                source: Some(s.clone()),
                initials: "?".to_string(),
            },
            Some(v) => Node::Avatar {
                source: None,
                initials: initials(&stringify(v)),
            },
            None => Node::Avatar {
                source: None,
                initials: "?".to_string(),
            },
        }
    }

    /// Format a money value: symbol plus two decimals, no grouping.
    pub fn format_money(&self, value: &Value) -> String {
        let amount = match value {
            Value::Number(n) => parse_decimal(&n.to_string()),
            Value::String(s) => parse_decimal(s.trim()),
            _ => None,
        }
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{:.2}", self.config.currency_symbol, amount)
    }

    /// Format a date value with the configured pattern.
    ///
    /// Numbers are epoch milliseconds. Unparseable text is shown as-is.
    pub fn format_date(&self, value: &Value) -> String {
        let date = match value {
            Value::Number(n) => n
                .as_f64()
                .and_then(|ms| DateTime::from_timestamp_millis(ms as i64))
                .map(|dt| dt.date_naive()),
            Value::String(s) => parse_date(s.trim()),
            _ => None,
        };
        match date {
            Some(date) => self.write_date(date),
            None => stringify(value),
        }
    }

    fn write_date(&self, date: NaiveDate) -> String {
        let mut items: Vec<Item<'_>> = StrftimeItems::new(&self.config.date_format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            log::warn!(
                "Invalid date format '{}', using {}",
                self.config.date_format,
                FALLBACK_DATE_FORMAT
            );
            items = StrftimeItems::new(FALLBACK_DATE_FORMAT).collect();
        }
        let mut out = String::new();
        if write!(out, "{}", date.format_with_items(items.iter())).is_err() {
            return date.to_string();
        }
        out
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    if is_absent(value) { None } else { value }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn is_url_like(s: &str) -> bool {
    s.starts_with("http://")
        || s.starts_with("https://")
        || s.starts_with("data:")
        || s.starts_with('/')
}

/// First letter of up to two words, uppercased.
fn initials(name: &str) -> String {
    let out: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if out.is_empty() { "?".to_string() } else { out }
}

/// en-US number formatting: thousands separators and at most three
/// fraction digits.
pub fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return group_thousands(&i.unsigned_abs().to_string(), i < 0);
    }
    if let Some(u) = n.as_u64() {
        return group_thousands(&u.to_string(), false);
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    if !f.is_finite() {
        return f.to_string();
    }
    let fixed = format!("{:.3}", f.abs());
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (trimmed, None),
    };
    let negative = f < 0.0 && trimmed != "0";
    let mut out = group_thousands(int_part, negative);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str, negative: bool) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
