//! Error types and error handling for semsplit.
//!
//! The splitting core itself never fails on input; these errors
//! come from configuration, file handling and the ingest layer
//! around it. Presentation (CLI exit codes, messages) is handled
//! by the respective adapter modules.

use thiserror::Error;

/// Result type alias for semsplit operations
pub type Result<T> = std::result::Result<T, SemsplitError>;

/// Main error type for semsplit
#[derive(Error, Debug)]
pub enum SemsplitError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input not found: {0}")]
    InputNotFound(String),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Ingest failed: {0}")]
    IngestFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl SemsplitError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, SemsplitError::InputNotFound(_))
    }

    /// Check if this is a bad request error (invalid input or config)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            SemsplitError::ConfigError(_)
                | SemsplitError::InvalidInput(_)
                | SemsplitError::LimitExceeded(_)
        )
    }
}
