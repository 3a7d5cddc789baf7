//! Grid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::column::ColumnWidth;
use crate::error::ConfigError;

/// Presentation defaults shared by every grid that uses this config.
///
/// Every field has a default, so a config file only needs the keys it wants
/// to change.
///
/// # Example
///
/// ```
/// use gridline::config::GridConfig;
///
/// let config = GridConfig::default()
///     .with_currency_symbol("€")
///     .with_fallback_token("n/a");
/// assert_eq!(config.currency_symbol, "€");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Shown for absent values.
    ///
    /// Default: `-`
    pub fallback_token: String,

    /// Prefix for money cells.
    ///
    /// Default: `$`
    pub currency_symbol: String,

    /// chrono format string for date cells.
    ///
    /// Default: `%m/%d/%Y`
    pub date_format: String,

    /// Label for truthy boolean cells.
    pub yes_label: String,

    /// Label for falsy boolean cells.
    pub no_label: String,

    /// Message shown when there are no rows.
    pub empty_message: String,

    /// Optional icon name shown above the empty message.
    pub empty_icon: Option<String>,

    /// Label next to the loading spinner.
    pub loading_label: String,

    /// Width for columns that don't declare one.
    pub default_column_width: ColumnWidth,

    /// Indent (in cells) of expanded row content.
    pub expanded_indent: u16,

    /// Disclosure glyph for expanded rows.
    pub expanded_indicator: char,

    /// Disclosure glyph for collapsed rows.
    pub collapsed_indicator: char,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            fallback_token: "-".to_string(),
            currency_symbol: "$".to_string(),
            date_format: "%m/%d/%Y".to_string(),
            yes_label: "Yes".to_string(),
            no_label: "No".to_string(),
            empty_message: "No data available".to_string(),
            empty_icon: None,
            loading_label: "Loading...".to_string(),
            default_column_width: ColumnWidth::Flex(1),
            expanded_indent: 2,
            expanded_indicator: '▼',
            collapsed_indicator: '▶',
        }
    }
}

impl GridConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded grid config from {}", path.display());
        Ok(config)
    }

    /// Sets the fallback token.
    pub fn with_fallback_token(mut self, token: impl Into<String>) -> Self {
        self.fallback_token = token.into();
        self
    }

    /// Sets the currency symbol.
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Sets the date format.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Sets the empty-state message and icon.
    pub fn with_empty_state(mut self, message: impl Into<String>, icon: Option<String>) -> Self {
        self.empty_message = message.into();
        self.empty_icon = icon;
        self
    }

    /// Sets the default column width.
    pub fn with_default_column_width(mut self, width: ColumnWidth) -> Self {
        self.default_column_width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GridConfig =
            serde_json::from_str(r#"{"currencySymbol": "£", "expandedIndent": 4}"#).unwrap();
        assert_eq!(config.currency_symbol, "£");
        assert_eq!(config.expanded_indent, 4);
        assert_eq!(config.fallback_token, "-");
        assert_eq!(config.default_column_width, ColumnWidth::Flex(1));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = GridConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
