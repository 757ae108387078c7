//! Analysis error types.

use thiserror::Error;

/// Errors that can occur during document analysis.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input could not be segmented.
    #[error("Text error: {0}")]
    Text(#[from] prooflint_text::TextError),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// External sentence check failure.
    #[error("External check error: {0}")]
    External(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an external check error.
    pub fn external(message: impl Into<String>) -> Self {
        Self::External(message.into())
    }
}
