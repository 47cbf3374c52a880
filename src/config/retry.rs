//! Retry configuration for transient failures.

use std::time::Duration;

/// Configuration for retry behavior on transient failures.
///
/// Server errors (5xx) and network failures are retried with exponential
/// backoff and full jitter. Before retry `n` (0-based, the first retry is
/// `n = 0`) the transport sleeps for a uniformly random duration in
/// `[0, min(max_delay, base_delay * 2^n)]`.
///
/// ## Default Values
///
/// - `max_retries`: 3 (at most 4 attempts per call)
/// - `base_delay`: 500ms
/// - `max_delay`: 30s
///
/// ## Example
///
/// ```rust
/// use authzen_client::RetryConfig;
/// use std::time::Duration;
///
/// let config = RetryConfig::new()
///     .with_max_retries(5)
///     .with_base_delay(Duration::from_millis(200))
///     .with_max_delay(Duration::from_secs(10));
///
/// assert_eq!(config.max_attempts(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,

    /// Backoff ceiling for the first retry.
    pub base_delay: Duration,

    /// Upper bound for any backoff ceiling.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Creates a new retry configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that disables retries.
    pub fn disabled() -> Self {
        Self { max_retries: 0, ..Default::default() }
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff ceiling of the first retry.
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the cap applied to every backoff ceiling.
    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Returns the total number of attempts a call may make.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Returns `true` if retries are enabled.
    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// Returns the upper bound of the backoff before retry `retry`
    /// (0-based): `min(max_delay, base_delay * 2^retry)`.
    pub fn delay_ceiling(&self, retry: u32) -> Duration {
        // 2^31 overflows any realistic base delay, so saturate early
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Picks the backoff before retry `retry` (0-based), uniformly at random
    /// in `[0, delay_ceiling(retry)]`.
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        self.delay_ceiling(retry).mul_f64(fastrand::f64())
    }

    /// Like [`RetryConfig::delay_for_retry`], drawing from `rng`.
    pub fn delay_for_retry_with(&self, retry: u32, rng: &mut fastrand::Rng) -> Duration {
        self.delay_ceiling(retry).mul_f64(rng.f64())
    }
}
