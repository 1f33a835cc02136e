//! Error types for response parsing and field configuration

use thiserror::Error;

/// Failure to interpret a search response as a whole
///
/// Any of these aborts emission for the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// Body is not valid JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Top-level layout is not the expected one
    #[error("Invalid response structure: {0}")]
    InvalidStructure(String),

    /// Search metadata or its query string is absent
    #[error("Missing query: {0}")]
    MissingQuery(String),

    /// Echoed query could not be percent-decoded
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for ResponseError {
    fn from(e: serde_json::Error) -> Self {
        ResponseError::InvalidJson(e.to_string())
    }
}

/// Failure to interpret one status entry; the entry is skipped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// Entry is not a JSON object
    #[error("Entry is not a JSON object")]
    NotAnObject,

    /// Required field absent or of the wrong type
    #[error("Missing or invalid '{0}'")]
    MissingField(String),

    /// Author is neither an object nor an encoded object
    #[error("Invalid author: {0}")]
    InvalidAuthor(String),

    /// Relationship count is not an integer
    #[error("Invalid friends_count: {0}")]
    InvalidCount(String),
}

/// Invalid output field configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A field name is empty
    #[error("Field name for '{0}' must not be empty")]
    EmptyName(&'static str),

    /// Two added fields share a name
    #[error("Duplicate field name '{0}'")]
    DuplicateName(String),

    /// An added field reuses the name of an input field
    #[error("Field name '{0}' is already used by an input field")]
    InputCollision(String),

    /// TOML could not be read or written
    #[error("Configuration format error: {0}")]
    Format(String),
}
