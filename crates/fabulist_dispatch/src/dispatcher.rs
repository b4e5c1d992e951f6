//! Bounded retry around a single generation call.

use crate::RetryPolicy;
use fabulist_error::FabulistResult;
use std::future::Future;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, error, info, instrument, warn};

/// Runs an async operation, retrying every failure on the policy schedule.
///
/// Failures are not classified: a failed attempt is retried until
/// `max_retries` retries are spent, and the last error is returned. The
/// wait between attempts is a tokio timer sleep.
///
/// # Examples
///
/// ```
/// use fabulist_dispatch::{RetryDispatcher, RetryPolicy};
/// use fabulist_error::FabulistResult;
///
/// # #[tokio::main]
/// # async fn main() -> FabulistResult<()> {
/// let dispatcher = RetryDispatcher::new(RetryPolicy::no_retry());
/// let value = dispatcher.execute("answer", || async { Ok(42) }).await?;
/// assert_eq!(value, 42);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RetryDispatcher {
    policy: RetryPolicy,
}

impl RetryDispatcher {
    /// Create a dispatcher for the given policy.
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// The policy in use.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute `operation`, retrying on any error.
    ///
    /// # Errors
    ///
    /// Returns the error of the final attempt once retries are exhausted.
    #[instrument(skip(self, operation), fields(max_attempts = self.policy.max_attempts()))]
    pub async fn execute<F, Fut, T>(&self, name: &str, mut operation: F) -> FabulistResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = FabulistResult<T>>,
    {
        let max_attempts = self.policy.max_attempts();
        let mut attempt: u32 = 0;

        Retry::spawn(self.policy.delays(), || {
            attempt += 1;
            let current = attempt;
            let call = operation();
            async move {
                debug!(operation = name, attempt = current, "Dispatching");
                match call.await {
                    Ok(value) => {
                        if current > 1 {
                            info!(operation = name, attempt = current, "Succeeded after retry");
                        }
                        Ok(value)
                    }
                    Err(e) => {
                        if current < max_attempts {
                            warn!(
                                operation = name,
                                attempt = current,
                                max_attempts,
                                error = %e,
                                "Attempt failed, will retry"
                            );
                        } else {
                            error!(
                                operation = name,
                                attempts = current,
                                error = %e,
                                "Retries exhausted"
                            );
                        }
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                }
            }
        })
        .await
    }
}
