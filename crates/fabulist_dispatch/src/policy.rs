//! Backoff schedule for generation calls.

use fabulist_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How many times to retry a failed call and how long to wait in between.
///
/// The wait before retry `i` (0-based) is
/// `initial_backoff_ms * backoff_multiplier^i`, rounded to whole
/// milliseconds.
///
/// # Examples
///
/// ```
/// use fabulist_dispatch::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 4);
/// assert_eq!(
///     policy.delays(),
///     vec![
///         Duration::from_millis(1500),
///         Duration::from_millis(2250),
///         Duration::from_millis(3375),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default, deny_unknown_fields)]
pub struct RetryPolicy {
    /// Retries after the first attempt (default 3).
    max_retries: u32,
    /// Wait before the first retry in milliseconds (default 1500).
    initial_backoff_ms: u64,
    /// Growth factor applied to each subsequent wait (default 1.5).
    backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 1500,
            backoff_multiplier: 1.5,
        }
    }
}

impl RetryPolicy {
    /// Create a policy.
    pub fn new(max_retries: u32, initial_backoff_ms: u64, backoff_multiplier: f64) -> Self {
        Self {
            max_retries,
            initial_backoff_ms,
            backoff_multiplier,
        }
    }

    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self::new(0, 0, 1.0)
    }

    /// Total attempts including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Waits between consecutive attempts, one per retry.
    pub fn delays(&self) -> Vec<Duration> {
        (0..self.max_retries)
            .map(|i| {
                let ms = self.initial_backoff_ms as f64 * self.backoff_multiplier.powi(i as i32);
                Duration::from_millis(ms.round() as u64)
            })
            .collect()
    }

    /// Check that the schedule is well formed.
    ///
    /// # Errors
    ///
    /// Returns an error if the multiplier is below 1.0 or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(ConfigError::new(format!(
                "retry.backoff_multiplier must be a finite number of at least 1.0, got {}",
                self.backoff_multiplier
            )));
        }
        Ok(())
    }
}
