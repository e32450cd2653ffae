//! Error types for schema loading and quantity parsing.

use thiserror::Error;

/// Errors raised while parsing a resource quantity string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity is empty")]
    Empty,

    #[error(
        "quantities must match the regular expression '{pattern}': {0:?}",
        pattern = crate::quantity::QUANTITY_PATTERN
    )]
    Invalid(String),
}

/// Errors raised while reading or writing a schema document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported document extension: {0}")]
    UnsupportedFormat(String),

    #[error("invalid TOML document: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to render TOML document: {0}")]
    TomlRender(#[from] toml::ser::Error),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}
