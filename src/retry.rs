/// Retry policy for operations prone to rate limiting
///
/// Bounded exponential backoff for the CLI command layer. The event core
/// itself never retries: a failed query or attach is surfaced to the caller,
/// and it is the caller that decides to go again. This module is that
/// decision, packaged.
use serde::{Deserialize, Serialize};
use std::future::Future;
use tokio::time::{Duration, sleep};

/// Configuration for retry behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,

    /// Initial delay in milliseconds before the first retry
    pub initial_delay_ms: u64,

    /// Multiplier for exponential backoff
    /// Each retry delay = initial_delay_ms * backoff_multiplier^retry_count
    pub backoff_multiplier: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay_ms: 100,
            backoff_multiplier: 4,
        }
    }
}

/// Whether an error message looks like provider rate limiting
fn is_rate_limited(message: &str) -> bool {
    message.contains("429") || message.contains("Too Many Requests")
}

impl RetryConfig {
    /// Create a new retry configuration
    pub fn new(max_retries: u32, initial_delay_ms: u64, backoff_multiplier: u64) -> Self {
        Self {
            max_retries,
            initial_delay_ms,
            backoff_multiplier,
        }
    }

    /// Execute an operation, retrying rate-limit failures with exponential
    /// backoff
    ///
    /// Delays grow as initial_delay * multiplier^retry_count, e.g. with the
    /// default 4x multiplier: 100ms → 400ms → 1600ms → 6400ms → 25600ms.
    /// Non-rate-limit errors fail immediately; once `max_retries` is
    /// exhausted the last error is returned.
    pub async fn execute<F, Fut, T, E>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::error::Error,
    {
        self.execute_with_predicate(&mut operation, |e| is_rate_limited(&e.to_string()))
            .await
    }

    /// Execute an operation with retry logic, using a custom error predicate
    ///
    /// # Arguments
    ///
    /// * `operation` - A closure that returns a Future with a Result
    /// * `is_retryable` - A function that determines if an error should be retried
    pub async fn execute_with_predicate<F, Fut, T, E, P>(
        &self,
        mut operation: F,
        is_retryable: P,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::error::Error,
        P: Fn(&E) -> bool,
    {
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if is_retryable(&e) && retries < self.max_retries => {
                    let delay_ms = self
                        .initial_delay_ms
                        .saturating_mul(self.backoff_multiplier.pow(retries));

                    tracing::debug!(
                        "Retryable error, retrying after {}ms (attempt {}/{}): {}",
                        delay_ms,
                        retries + 1,
                        self.max_retries,
                        e
                    );

                    sleep(Duration::from_millis(delay_ms)).await;
                    retries += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
