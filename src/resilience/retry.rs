//! Bounded retry of API timeouts.

use std::future::Future;
use tracing::{debug, warn};

use crate::errors::EncosionResult;

/// Configuration for retry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Additional attempts allowed after the first one fails with a
    /// retryable error.
    pub max_retries: u32,
}

impl RetryConfig {
    /// Creates a configuration with the given bound.
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: crate::config::DEFAULT_MAX_RETRIES,
        }
    }
}

/// Re-runs an operation while it fails with a retryable error.
///
/// There is no delay between attempts and no overall deadline; each
/// attempt is bounded by its own transport timeout.
#[derive(Debug, Clone, Copy)]
pub struct RetryExecutor {
    config: RetryConfig,
}

impl RetryExecutor {
    /// Creates a new retry executor.
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> RetryConfig {
        self.config
    }

    /// Executes an operation, retrying retryable failures.
    ///
    /// `on_retry` is called with the 1-based retry number before each
    /// re-issue.
    pub async fn execute<F, Fut, T, R>(&self, operation: &str, mut f: F, mut on_retry: R) -> EncosionResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = EncosionResult<T>>,
        R: FnMut(u32),
    {
        let mut remaining = self.config.max_retries;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match f().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation, attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) if error.is_retryable() && remaining > 0 => {
                    remaining -= 1;
                    warn!(
                        operation,
                        attempt,
                        remaining,
                        error = %error,
                        "Retrying after API timeout"
                    );
                    on_retry(attempt);
                }
                Err(error) => return Err(error),
            }
        }
    }
}
