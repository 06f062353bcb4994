//! Caller-side retry for transient failures.
//!
//! The entry client never retries on its own; re-issuing a call is the
//! invoking command's decision. Only the idempotent commands (get, list,
//! delete) opt in — an insert is never retried, because a duplicated
//! record is worse than a failed invocation.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use glyco_client::ClientError;

/// Fixed delay between attempts. This is an interactive tool, so there is
/// no backoff schedule; a second attempt either helps quickly or not at
/// all.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// A bounded number of extra attempts, applied only to transient failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy allowing `retries` extra attempts.
    pub fn new(retries: u32) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
            delay: RETRY_DELAY,
        }
    }

    /// Overrides the inter-attempt delay.
    #[allow(dead_code)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Runs an idempotent operation under this policy.
    ///
    /// Non-transient failures return immediately; transient ones are
    /// retried until the attempt budget runs out.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && e.is_transient() => {
                    warn!(error = %e, attempt, "Transient failure, retrying");
                    tokio::time::sleep(self.delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn test_success_passes_through() {
        let policy = RetryPolicy::new(3).with_delay(Duration::ZERO);
        let result: Result<u32, ClientError> = policy.run(|| async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_non_transient_fails_immediately() {
        let attempts = Cell::new(0);
        let policy = RetryPolicy::new(3).with_delay(Duration::ZERO);

        let result: Result<(), ClientError> = policy
            .run(|| {
                attempts.set(attempts.get() + 1);
                async { Err(ClientError::Validation("nope".to_string())) }
            })
            .await;

        assert!(matches!(result, Err(ClientError::Validation(_))));
        assert_eq!(attempts.get(), 1);
    }

    #[tokio::test]
    async fn test_transient_retried_until_budget() {
        let attempts = Cell::new(0);
        let policy = RetryPolicy::new(2).with_delay(Duration::ZERO);

        let result: Result<(), ClientError> = policy
            .run(|| {
                attempts.set(attempts.get() + 1);
                async { Err(ClientError::Server { status: 503 }) }
            })
            .await;

        assert!(matches!(result, Err(ClientError::Server { .. })));
        assert_eq!(attempts.get(), 3);
    }

    #[tokio::test]
    async fn test_transient_then_success() {
        let attempts = Cell::new(0);
        let policy = RetryPolicy::new(2).with_delay(Duration::ZERO);

        let result: Result<u32, ClientError> = policy
            .run(|| {
                attempts.set(attempts.get() + 1);
                let attempt = attempts.get();
                async move {
                    if attempt < 2 {
                        Err(ClientError::Server { status: 502 })
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.get(), 2);
    }
}
