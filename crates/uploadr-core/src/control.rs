//! Cancellation for in-flight uploads.
//!
//! A caller that wants to stop a retry loop early hands an [`AbortToken`] to
//! the `RetryingUploader` and keeps a clone. Setting the token stops the loop
//! at its next check: before an attempt or during the pause between attempts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared abort flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct AbortToken(Arc<AtomicBool>);

impl AbortToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request abort. Idempotent.
    pub fn abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
