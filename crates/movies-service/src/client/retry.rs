//! Fixed-backoff retry for upstream calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::error::UpstreamError;

/// How often and how patiently a failed upstream call is repeated.
///
/// Only `ServerFault`s are retried. The delay between attempts is constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub max_retries: u32,
    /// Pause before each retry.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Starts a fresh budget of `max_retries`.
    #[must_use]
    pub fn budget(self) -> RetryBudget {
        RetryBudget {
            policy: self,
            used: 0,
        }
    }

    /// Runs `attempt` until it succeeds, fails with a non-retryable error,
    /// or the budget runs out.
    ///
    /// # Errors
    ///
    /// Returns the first `ClientFault`, or the last `ServerFault` once every
    /// retry has been spent.
    pub async fn run<T, F, Fut>(self, service: &str, mut attempt: F) -> Result<T, UpstreamError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let mut budget = self.budget();
        loop {
            let err = match attempt().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            if !budget.wait_for_retry(service, &err).await {
                return Err(err);
            }
        }
    }
}

/// Retries remaining for one logical call. A stream shares a single budget
/// across its initial open and every reconnect.
#[derive(Debug, Clone)]
pub struct RetryBudget {
    policy: RetryPolicy,
    used: u32,
}

impl RetryBudget {
    /// Spends one retry on `err` and sleeps the backoff.
    ///
    /// Returns `false` without waiting when `err` is not retryable or the
    /// budget is exhausted.
    pub async fn wait_for_retry(&mut self, service: &str, err: &UpstreamError) -> bool {
        if !err.is_retryable() || self.used >= self.policy.max_retries {
            return false;
        }
        self.used += 1;
        warn!(
            service,
            attempt = self.used,
            max_retries = self.policy.max_retries,
            error = %err,
            "upstream call failed, retrying"
        );
        tokio::time::sleep(self.policy.backoff).await;
        true
    }

    /// Retries spent so far.
    #[must_use]
    pub fn used(&self) -> u32 {
        self.used
    }
}
