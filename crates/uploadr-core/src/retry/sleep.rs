//! Pauses between attempts.

use std::time::{Duration, Instant};

use crate::control::AbortToken;

/// Longest single blocking sleep while waiting; bounds abort latency.
const ABORT_POLL: Duration = Duration::from_millis(50);

/// Blocks the caller between attempts. Implementations must return early
/// once `abort` is set.
pub trait Sleeper: Send {
    fn sleep(&mut self, duration: Duration, abort: Option<&AbortToken>);
}

/// Sleeps on the current thread, waking every 50ms to check the abort token.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration, abort: Option<&AbortToken>) {
        let Some(abort) = abort else {
            std::thread::sleep(duration);
            return;
        };
        let deadline = Instant::now() + duration;
        loop {
            if abort.is_aborted() {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            std::thread::sleep((deadline - now).min(ABORT_POLL));
        }
    }
}
