//! Back-off policy for Sheets reads.
//!
//! Only transient failures are retried: timeouts, connection errors and 5xx
//! responses. Client errors (bad credentials, unknown spreadsheet or range)
//! and malformed bodies are returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::SheetsError;

/// Longest pause between two attempts. `/api/cms` callers wait on the read.
const MAX_DELAY: Duration = Duration::from_secs(10);

pub(crate) fn is_retriable(err: &SheetsError) -> bool {
    let SheetsError::Http(e) = err else {
        return false;
    };
    e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub(crate) max_retries: u32,
    pub(crate) backoff_base: Duration,
}

impl RetryPolicy {
    pub(crate) fn new(max_retries: u32, backoff_base_ms: u64) -> Self {
        Self {
            max_retries,
            backoff_base: Duration::from_millis(backoff_base_ms),
        }
    }

    /// Un-jittered pause before retry number `retry` (1-based): the base
    /// doubled per retry, capped at [`MAX_DELAY`].
    pub(crate) fn nominal_delay(&self, retry: u32) -> Duration {
        let factor = 1u32 << retry.saturating_sub(1).min(10);
        self.backoff_base.saturating_mul(factor).min(MAX_DELAY)
    }

    /// [`RetryPolicy::nominal_delay`] scaled by a random factor in `[0.75, 1.25)`.
    fn jittered_delay(&self, retry: u32) -> Duration {
        self.nominal_delay(retry)
            .mul_f64(0.75 + rand::random::<f64>() * 0.5)
    }

    /// Reads `range` through `read`, retrying transient failures.
    pub(crate) async fn run<T, F, Fut>(&self, range: &str, mut read: F) -> Result<T, SheetsError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SheetsError>>,
    {
        let mut retry = 0u32;
        loop {
            let err = match read().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            if retry >= self.max_retries || !is_retriable(&err) {
                if retry > 0 {
                    tracing::warn!(range, attempts = retry + 1, error = %err, "sheets range read failed");
                }
                return Err(err);
            }
            retry += 1;
            let delay = self.jittered_delay(retry);
            tracing::warn!(
                range,
                retry,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "transient sheets error, backing off"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
