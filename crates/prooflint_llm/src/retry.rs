//! Retry with exponential backoff.

use std::time::Duration;

use tracing::debug;

use crate::client::{CompletionClient, CompletionRequest, CompletionResponse};
use crate::error::LlmError;

/// Backoff schedule for transient failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Delay before the first retry.
    pub initial_delay: Duration,

    /// Multiplier applied to the delay per retry.
    pub multiplier: f64,

    /// Longest single delay.
    pub max_delay: Duration,

    /// Total attempts, the first call included.
    pub max_attempts: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            multiplier: 2.0,
            max_delay: Duration::from_secs(10),
            max_attempts: 3,
        }
    }
}

impl RetryPolicy {
    /// The delay before the given retry, 0-based.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let millis = self.initial_delay.as_millis() as f64 * self.multiplier.powi(retry as i32);
        Duration::from_millis(millis as u64).min(self.max_delay)
    }

    /// Calls the client, retrying rate limits and timeouts.
    ///
    /// Other failures return immediately.
    pub async fn run(
        &self,
        client: &dyn CompletionClient,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        let mut retries = 0u32;
        loop {
            match client.complete(request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && (retries as usize) + 1 < self.max_attempts => {
                    let delay = self.delay_for(retries);
                    debug!(
                        retry = retries + 1,
                        delay_ms = delay.as_millis() as u64,
                        "retrying after transient failure: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    retries += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
