//! Retry Module
//!
//! Runs a backend call until it succeeds, misses, or the attempt ceiling is hit.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::cache::DEFAULT_RETRIES;
use crate::error::{CacheError, Result};

// == Retry Policy ==
/// Attempt ceiling and inter-attempt delay for retrying operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts made when a caller asks for retries
    pub max_attempts: u32,
    /// Pause between attempts; zero means back-to-back
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRIES,
            delay: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given ceiling and no delay.
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    /// Sets a fixed pause between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of attempts for one call; never below one.
    pub fn attempts(&self, retry: bool) -> u32 {
        if retry {
            self.max_attempts.max(1)
        } else {
            1
        }
    }

    // == Execute ==
    /// Runs `op` until it succeeds or stops being retryable.
    ///
    /// A [`CacheError::Miss`] and any non-retryable error are returned on
    /// first occurrence. Otherwise the last error is returned once the
    /// attempts are used up.
    pub async fn execute<F, Fut, T>(
        &self,
        action: &str,
        key: &str,
        retry: bool,
        mut op: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.attempts(retry);
        let mut attempt = 1;

        loop {
            let err = match op().await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) => err,
            };

            debug!(
                attempt,
                attempts,
                key,
                error = %err,
                "failed to {} cache item",
                action
            );

            if attempt >= attempts {
                return Err(err);
            }
            attempt += 1;

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }
    }
}
