//! Enhancement error types.

use thiserror::Error;

/// Errors from the language-model client.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The API key environment variable is missing.
    #[error("API key environment variable {0} is not set")]
    MissingApiKey(String),

    /// The endpoint returned 429.
    #[error("Rate limited")]
    RateLimited,

    /// The request exceeded the client timeout.
    #[error("Request timed out")]
    Timeout,

    /// Non-success response from the endpoint.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Transport failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be interpreted.
    #[error("Unparsable model response")]
    Unparsable,

    /// A spending ceiling would be crossed.
    #[error("Budget exhausted: {0}")]
    BudgetExhausted(String),
}

impl LlmError {
    /// True for transient failures worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LlmError::RateLimited | LlmError::Timeout)
    }
}
