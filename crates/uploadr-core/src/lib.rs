pub mod config;
pub mod control;
pub mod logging;
pub mod retry;
pub mod upload;

pub use control::AbortToken;
pub use retry::{PolicyError, RetryPolicy, RetryingUploader};
pub use upload::{RedisUploader, UploadError, Uploader};
