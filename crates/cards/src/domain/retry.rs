//! Bounded exponential backoff for upstream calls.

use std::future::Future;
use std::time::Duration;

use crate::errors::{CardsError, CardsResult};

/// Default number of upstream calls per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(2);

/// Retry configuration for transient upstream failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total calls allowed, including the first one
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles for each later one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

/// Value produced by the last attempt together with the attempts consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempted<T> {
    pub value: T,
    pub attempts: u32,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay to wait after the 0-based `attempt` failed: `base × 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Run `op` until it succeeds, fails fatally, or attempts run out.
    ///
    /// `op` receives the 0-based attempt number. Only errors for which
    /// [`CardsError::is_transient`] holds are retried. Every failure that
    /// leaves this function is a [`CardsError::UpstreamUnavailable`]
    /// naming the attempts made.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> CardsResult<Attempted<T>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = CardsResult<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match op(attempt).await {
                Ok(value) => {
                    return Ok(Attempted {
                        value,
                        attempts: attempt + 1,
                    })
                }
                Err(err) if err.is_transient() && attempt + 1 < max_attempts => {
                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "Upstream overloaded or rate limited, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(attempt = attempt + 1, error = %err, "Upstream call failed");
                    return Err(CardsError::UpstreamUnavailable {
                        attempts: attempt + 1,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn overloaded() -> CardsError {
        CardsError::Upstream {
            status: Some(529),
            message: "overloaded_error - Overloaded".to_string(),
        }
    }

    #[test]
    fn test_delay_doubles() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let policy = RetryPolicy::new(3, Duration::from_secs(2));
        let calls = AtomicU32::new(0);
        let started = tokio::time::Instant::now();

        let result = policy
            .run(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 2 {
                        Err(overloaded())
                    } else {
                        Ok("done")
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result.value, "done");
        assert_eq!(result.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(started.elapsed() >= Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);

        let err = policy
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(overloaded()) }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(err, CardsError::UpstreamUnavailable { attempts: 3, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_not_retried() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);

        let err = policy
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err::<(), _>(CardsError::Upstream {
                        status: Some(401),
                        message: "authentication_error - invalid x-api-key".to_string(),
                    })
                }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(err, CardsError::UpstreamUnavailable { attempts: 1, .. }));
    }
}
