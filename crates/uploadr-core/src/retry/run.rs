//! Retry loop: run the inner uploader until success or the budget is spent.

use std::time::Duration;

use super::error::PolicyError;
use super::policy::RetryPolicy;
use super::sleep::{Sleeper, ThreadSleeper};
use crate::control::AbortToken;
use crate::upload::{UploadError, Uploader};

/// Decorator that retries a wrapped [`Uploader`] up to `max_attempts` times,
/// pausing `retry_interval` between failed attempts.
///
/// Knows nothing about the storage medium; every inner failure is treated the
/// same. Itself an `Uploader`, so it can stand in for the one it wraps.
pub struct RetryingUploader {
    inner: Box<dyn Uploader>,
    policy: RetryPolicy,
    sleeper: Box<dyn Sleeper>,
    abort: Option<AbortToken>,
}

impl RetryingUploader {
    pub fn new(inner: Box<dyn Uploader>, policy: RetryPolicy) -> Self {
        Self {
            inner,
            policy,
            sleeper: Box::new(ThreadSleeper),
            abort: None,
        }
    }

    /// Build from raw values; fails fast when `max_attempts` is zero.
    pub fn with_attempts(
        inner: Box<dyn Uploader>,
        max_attempts: u32,
        retry_interval: Duration,
    ) -> Result<Self, PolicyError> {
        Ok(Self::new(inner, RetryPolicy::new(max_attempts, retry_interval)?))
    }

    /// Replace how the loop waits between attempts.
    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Stop retrying once `token` is set.
    pub fn with_abort(mut self, token: AbortToken) -> Self {
        self.abort = Some(token);
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Give back the wrapped uploader without closing it.
    pub fn into_inner(self) -> Box<dyn Uploader> {
        self.inner
    }

    fn aborted(&self) -> bool {
        self.abort.as_ref().is_some_and(AbortToken::is_aborted)
    }
}

impl Uploader for RetryingUploader {
    fn upload_file(&mut self, name: &str) -> Result<(), UploadError> {
        let max_attempts = self.policy.max_attempts();
        let mut attempts = 0u32;

        loop {
            if self.aborted() {
                tracing::warn!(file = name, attempts, "upload cancelled");
                return Err(UploadError::Cancelled { attempts });
            }
            attempts += 1;
            tracing::info!(file = name, attempt = attempts, max_attempts, "upload attempt");

            let err = match self.inner.upload_file(name) {
                Ok(()) => {
                    tracing::info!(file = name, attempt = attempts, "upload succeeded");
                    return Ok(());
                }
                Err(e) => e,
            };
            tracing::warn!(file = name, attempt = attempts, error = %err, "upload attempt failed");

            let Some(delay) = self.policy.pause_after(attempts) else {
                tracing::error!(file = name, attempts, error = %err, "upload failed after all attempts");
                return Err(UploadError::Exhausted {
                    attempts,
                    last: Box::new(err),
                });
            };
            tracing::info!(
                file = name,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "retrying upload after pause"
            );
            self.sleeper.sleep(delay, self.abort.as_ref());
        }
    }

    fn close(&mut self) -> Result<(), UploadError> {
        self.inner.close()
    }
}
