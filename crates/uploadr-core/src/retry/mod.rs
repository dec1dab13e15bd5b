//! Bounded fixed-interval retry around an [`Uploader`](crate::upload::Uploader).
//!
//! The policy is deliberately flat: a fixed attempt budget and a fixed pause
//! between attempts. Failures are not classified; every inner failure is
//! retried the same way until the budget is spent.

mod error;
mod policy;
mod run;
mod sleep;

pub use error::PolicyError;
pub use policy::RetryPolicy;
pub use run::RetryingUploader;
pub use sleep::{Sleeper, ThreadSleeper};
