//! Error types for the router
//!
//! None of these escape `Router::route`: classification errors become the
//! reasoning of a general-intent decision and fallback errors become absence.

use concierge_domain::TemplateError;
use thiserror::Error;

/// Why a classification attempt did not produce a valid intent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    /// The model gateway failed (transport, timeout, backend error)
    #[error("{0}")]
    Gateway(String),

    /// The routing template could not be rendered
    #[error("{0}")]
    Template(#[from] TemplateError),

    /// The model output is not a JSON object with string fields
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    /// The category is not one of the three accepted labels
    #[error("Unexpected category: {0}")]
    UnexpectedCategory(String),
}

/// Errors building an identifier pattern
#[derive(Error, Debug)]
pub enum PatternError {
    /// The regular expression does not compile
    #[error("Invalid identifier pattern '{pattern}': {source}")]
    InvalidRegex {
        /// Offending pattern text
        pattern: String,
        /// Compiler error
        source: regex::Error,
    },
}

/// Router configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
