//! Retry policy construction errors.

/// Returned when a retry policy is built from invalid values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    /// `max_attempts` must be at least 1.
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
    /// Retry interval given in seconds was negative, not finite, or too large.
    #[error("retry interval must be a non-negative number of seconds, got {0}")]
    InvalidInterval(f64),
}
