//! Error types for stage runs

use thiserror::Error;
use tweetscan_extractor::ResponseError;

/// Fatal conditions that end a run
///
/// None of these is retried. The run moves to `Failed` and `dispose` still
/// releases the connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    /// Host base setup failed during `init`
    #[error("Host initialization error: {0}")]
    HostInit(String),

    /// Connection descriptor missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Opening the connection or running the search failed
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Response top level could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),

    /// Echoed query missing or not decodable
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Host rejected an output row
    #[error("Host error: {0}")]
    Host(String),
}

impl From<ResponseError> for StageError {
    fn from(e: ResponseError) -> Self {
        match e {
            ResponseError::MissingQuery(_) | ResponseError::Encoding(_) => {
                StageError::Encoding(e.to_string())
            }
            ResponseError::InvalidJson(_) | ResponseError::InvalidStructure(_) => {
                StageError::Parse(e.to_string())
            }
        }
    }
}

/// Result alias for stage operations
pub type Result<T> = std::result::Result<T, StageError>;
