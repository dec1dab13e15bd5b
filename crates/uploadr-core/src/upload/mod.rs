//! Single-attempt uploads.
//!
//! An [`Uploader`] performs exactly one attempt to persist a named file and
//! owns whatever connection backs it. Retry lives one layer up in
//! [`crate::retry`], which only ever sees this trait.

mod error;
mod store;

pub use error::UploadError;
pub use store::{storage_key, RedisUploader};

/// One upload attempt against a backing store, plus connection teardown.
pub trait Uploader: Send {
    /// Persist the contents of `name` under a key derived from it.
    fn upload_file(&mut self, name: &str) -> Result<(), UploadError>;

    /// Release the underlying connection. The uploader is unusable afterwards.
    fn close(&mut self) -> Result<(), UploadError>;
}

