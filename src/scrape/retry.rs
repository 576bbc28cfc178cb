//! Retry controller with exponential backoff
//!
//! Wraps one fallible attempt unit (navigate, paginate, extract, build) in
//! bounded retries. Only transient errors are retried; session lifecycle
//! and configuration errors propagate immediately, because repeating them
//! against a broken session cannot succeed.

use crate::ScrapeError;
use futures::future::BoxFuture;
use std::time::Duration;

/// Bounded-attempt exponential backoff schedule
///
/// `delay = min(max_delay, base_delay * 2^(attempt - 1))`, so the default
/// policy sleeps 4s then 8s then gives up after the third failure.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(4),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay,
        }
    }

    /// Backoff delay to sleep after the given (1-based) failed attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let doubling = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay
            .saturating_mul(doubling)
            .min(self.max_delay)
    }
}

/// Runs `attempt_fn` until it succeeds, fails non-transiently, or the
/// attempt ceiling is reached
///
/// The attempt function is handed fresh borrows of `state` (typically the
/// live session) and `ctx` (the per-operation parameters) on every try, and
/// must not capture anything else. Success short-circuits immediately with
/// no trailing delay. After the final transient failure the last cause is
/// surfaced inside [`ScrapeError::ExhaustedRetries`].
pub async fn with_retry<S, C, T, F>(
    policy: &RetryPolicy,
    state: &mut S,
    ctx: &C,
    mut attempt_fn: F,
) -> crate::Result<T>
where
    S: ?Sized,
    C: ?Sized,
    F: for<'a> FnMut(&'a mut S, &'a C) -> BoxFuture<'a, crate::Result<T>>,
{
    let mut attempt = 1u32;

    loop {
        match attempt_fn(state, ctx).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::debug!(attempt, "Attempt succeeded after retrying");
                }
                return Ok(value);
            }
            Err(err) if !err.is_transient() => {
                tracing::error!(error = %err, "Non-transient failure, not retrying");
                return Err(err);
            }
            Err(err) => {
                if attempt >= policy.max_attempts {
                    tracing::error!(
                        attempts = policy.max_attempts,
                        error = %err,
                        "Retries exhausted"
                    );
                    return Err(ScrapeError::ExhaustedRetries {
                        attempts: policy.max_attempts,
                        source: Box::new(err),
                    });
                }

                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient failure, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
