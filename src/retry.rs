//! Retrying calls against eventually consistent resources.
//!
//! A freshly inserted product or sub-account can take a few seconds to become
//! readable, so an immediate `get` may answer 404 (or 401 for a brand new
//! account). [`retry`] re-runs an async operation while it fails with one of
//! the configured status codes.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopping_samples::retry::{retry, RetryPolicy};
//!
//! let product = retry(&RetryPolicy::default(), || client.products().get(merchant_id, &id)).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::clients::HttpError;
use crate::error::SamplesError;

/// Errors that may carry an HTTP status worth retrying on.
pub trait RetryableError {
    /// The HTTP status of the failed call, if any.
    fn retry_status(&self) -> Option<u16>;
}

impl RetryableError for HttpError {
    fn retry_status(&self) -> Option<u16> {
        self.status()
    }
}

impl RetryableError for SamplesError {
    fn retry_status(&self) -> Option<u16> {
        self.status()
    }
}

/// Delay schedule between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backoff {
    /// Sleeps `attempt²` seconds after the n-th failed attempt (1s, 4s, 9s, ...).
    Quadratic,
    /// Starts at `initial` and doubles after each failure, capped at `max`.
    Exponential {
        /// First delay.
        initial: Duration,
        /// Upper bound on any single delay.
        max: Duration,
    },
}

impl Backoff {
    /// Returns the delay after failed attempt number `attempt` (counted from 1).
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        match *self {
            Self::Quadratic => Duration::from_secs(u64::from(attempt).pow(2)),
            Self::Exponential { initial, max } => {
                let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
                initial.saturating_mul(factor).min(max)
            }
        }
    }
}

/// Which failures to retry, how often and how long to wait.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// HTTP statuses that trigger another attempt.
    pub retryable: Vec<u16>,
    /// Total attempts including the first.
    pub max_attempts: u32,
    /// Delay schedule.
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    /// 401 and 404, five attempts, quadratic backoff.
    fn default() -> Self {
        Self {
            retryable: vec![401, 404],
            max_attempts: 5,
            backoff: Backoff::Quadratic,
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff from 5 seconds capped at 30, used while a new
    /// sub-account propagates.
    #[must_use]
    pub fn exponential() -> Self {
        Self {
            backoff: Backoff::Exponential {
                initial: Duration::from_secs(5),
                max: Duration::from_secs(30),
            },
            ..Self::default()
        }
    }

    /// Returns `true` if `status` is configured as retryable.
    #[must_use]
    pub fn is_retryable(&self, status: Option<u16>) -> bool {
        status.is_some_and(|code| self.retryable.contains(&code))
    }
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or the
/// attempts are exhausted. The last error is returned unchanged.
///
/// # Errors
///
/// Returns the error of the final attempt.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    E: RetryableError + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                let status = error.retry_status();
                if attempt >= policy.max_attempts || !policy.is_retryable(status) {
                    return Err(error);
                }
                let delay = policy.backoff.delay(attempt);
                tracing::info!(
                    "Attempt {attempt} failed ({error}); retrying in {}s",
                    delay.as_secs()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ApiError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn api_error(code: u16) -> SamplesError {
        SamplesError::Http(HttpError::Response(ApiError {
            code,
            message: format!("status {code}"),
            errors: Vec::new(),
        }))
    }

    #[test]
    fn test_quadratic_delays() {
        let delays: Vec<u64> = (1..=4).map(|n| Backoff::Quadratic.delay(n).as_secs()).collect();
        assert_eq!(delays, vec![1, 4, 9, 16]);
    }

    #[test]
    fn test_exponential_delays_are_capped() {
        let backoff = RetryPolicy::exponential().backoff;
        let delays: Vec<u64> = (1..=5).map(|n| backoff.delay(n).as_secs()).collect();
        assert_eq!(delays, vec![5, 10, 20, 30, 30]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let started = tokio::time::Instant::now();

        let result = retry(&RetryPolicy::default(), || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(api_error(404))
                } else {
                    Ok("found")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "found");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let waited = started.elapsed();
        assert!(waited >= Duration::from_secs(1 + 4));
        assert!(waited < Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_returns_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let started = tokio::time::Instant::now();

        let result: Result<(), SamplesError> = retry(&RetryPolicy::default(), || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(api_error(400))
            }
        })
        .await;

        assert_eq!(result.unwrap_err().status(), Some(400));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() < Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_returns_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<(), SamplesError> = retry(&RetryPolicy::default(), || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(api_error(401))
            }
        })
        .await;

        assert_eq!(result.unwrap_err().status(), Some(401));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_without_status_are_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<(), SamplesError> = retry(&RetryPolicy::default(), || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(SamplesError::NoAccountAccess)
            }
        })
        .await;

        assert!(matches!(result, Err(SamplesError::NoAccountAccess)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
