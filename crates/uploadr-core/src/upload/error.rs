//! Upload error type shared by store adapters and the retry layer.

use std::io;
use std::path::PathBuf;

/// Error returned by an upload attempt or by the retry loop around it.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The upload target name was empty.
    #[error("empty upload target name")]
    EmptyName,
    /// The file could not be read from disk.
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The key-value store rejected the write or the connection failed.
    #[error("store: {0}")]
    Store(#[from] redis::RedisError),
    /// The uploader was closed before this call.
    #[error("uploader is closed")]
    Closed,
    /// Adapter-specific rejection that has no richer type.
    #[error("rejected: {0}")]
    Rejected(String),
    /// Every attempt in the budget failed. `last` is the final attempt's cause.
    #[error("upload failed after {attempts} attempts")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<UploadError>,
    },
    /// The abort token fired before the budget was spent.
    #[error("upload cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },
}
