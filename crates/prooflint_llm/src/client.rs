//! The completion client seam.

use async_trait::async_trait;

use crate::error::LlmError;

/// One completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt carrying the role and response contract.
    pub system: String,

    /// User prompt carrying the batched findings.
    pub user: String,

    /// Response token cap.
    pub max_response_tokens: u32,
}

/// What a completion call returned.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The assistant message content.
    pub content: String,

    /// Prompt tokens billed, zero when the endpoint omitted usage.
    pub prompt_tokens: u32,

    /// Completion tokens billed, zero when the endpoint omitted usage.
    pub completion_tokens: u32,
}

/// Sends completion requests to a language model.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
