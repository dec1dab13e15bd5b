use std::time::Duration;

use super::error::PolicyError;

/// Fixed attempt budget and fixed pause between attempts.
///
/// Immutable once built; `max_attempts` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    retry_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_interval: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Build a policy. `max_attempts` includes the first attempt and must be >= 1;
    /// a zero `retry_interval` means retries follow immediately.
    pub fn new(max_attempts: u32, retry_interval: Duration) -> Result<Self, PolicyError> {
        if max_attempts == 0 {
            return Err(PolicyError::ZeroAttempts);
        }
        Ok(Self {
            max_attempts,
            retry_interval,
        })
    }

    /// Like [`RetryPolicy::new`] but with the interval in (fractional) seconds,
    /// as it appears in config files and on the command line.
    pub fn from_secs_f64(max_attempts: u32, retry_interval_secs: f64) -> Result<Self, PolicyError> {
        let interval = Duration::try_from_secs_f64(retry_interval_secs)
            .map_err(|_| PolicyError::InvalidInterval(retry_interval_secs))?;
        Self::new(max_attempts, interval)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// Pause to take after failed attempt `attempt` (1-based), or `None` when
    /// that attempt was the last one in the budget.
    pub fn pause_after(&self, attempt: u32) -> Option<Duration> {
        (attempt < self.max_attempts).then_some(self.retry_interval)
    }
}
