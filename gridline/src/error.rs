//! Error types
//!
//! Rendering never fails; these cover the loading paths only (configuration
//! files and serialized column schemas).

use std::path::PathBuf;

/// Error loading a [`GridConfig`](crate::config::GridConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid config JSON.
    #[error("Failed to parse config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Error loading a serialized column schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema is not valid JSON or has the wrong shape.
    #[error("Invalid column schema: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two columns share an id.
    #[error("Duplicate column id '{id}'")]
    DuplicateColumn { id: String },
}

impl SchemaError {
    /// Creates a new duplicate column error.
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateColumn { id: id.into() }
    }
}
