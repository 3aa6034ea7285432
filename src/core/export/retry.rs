//! Retry policy for transfer operations
//!
//! Automation of desktop applications fails transiently (a busy document, a
//! dialog in the way), so a failed transfer is attempted again. The default
//! policy retries exactly once, immediately, whatever the failure was.

use crate::config::ExportConfig;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Named retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    retries: usize,
    backoff: Option<Duration>,
}

impl RetryPolicy {
    /// One extra attempt, no backoff, no filtering by failure kind
    pub const fn transient_once() -> Self {
        Self {
            retries: 1,
            backoff: None,
        }
    }

    /// A single attempt
    pub const fn no_retry() -> Self {
        Self {
            retries: 0,
            backoff: None,
        }
    }

    /// Builds the policy from the `[export]` section
    pub fn from_config(config: &ExportConfig) -> Self {
        let backoff = (config.retry_backoff_ms > 0)
            .then(|| Duration::from_millis(config.retry_backoff_ms));
        Self {
            retries: config.retries,
            backoff,
        }
    }

    /// Extra attempts after the first failure
    pub fn retries(&self) -> usize {
        self.retries
    }

    /// Total number of attempts
    pub fn max_attempts(&self) -> usize {
        self.retries + 1
    }

    /// Delay between attempts, if any
    pub fn backoff(&self) -> Option<Duration> {
        self.backoff
    }

    /// Runs `operation` until it succeeds or the attempts are used up
    ///
    /// The operation receives the 1-based attempt number. The error of the
    /// last attempt is returned when every attempt failed.
    pub async fn run<F, Fut, T, E>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut(usize) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.max_attempts();
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < max_attempts => {
                    tracing::debug!(operation = label, attempt, error = %e, "Attempt failed");
                    crate::log_retry_attempt!(attempt + 1, max_attempts, e);
                    if let Some(delay) = self.backoff {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::transient_once()
    }
}
