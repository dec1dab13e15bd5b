//! Redis-backed uploader: one `SET` per attempt.

use std::fs;
use std::path::PathBuf;

use redis::Commands;
use sha2::{Digest, Sha256};

use super::{UploadError, Uploader};
use crate::config::StoreConfig;

/// Key under which the contents of `name` are stored: `"{prefix}:{name}"`.
pub fn storage_key(prefix: &str, name: &str) -> String {
    format!("{prefix}:{name}")
}

/// Uploader that writes each file's bytes to a single Redis key.
///
/// Owns the connection; `close` drops it and every later upload fails with
/// [`UploadError::Closed`].
pub struct RedisUploader {
    conn: Option<redis::Connection>,
    key_prefix: String,
    ttl_secs: Option<u64>,
}

impl RedisUploader {
    /// Open a connection to the store described by `cfg`.
    pub fn connect(cfg: &StoreConfig) -> Result<Self, UploadError> {
        let client = redis::Client::open(cfg.connection_info()?)?;
        let conn = client.get_connection_with_timeout(cfg.connect_timeout())?;
        tracing::info!(
            host = %cfg.host,
            port = cfg.port,
            database = cfg.database,
            "connected to store"
        );
        Ok(Self {
            conn: Some(conn),
            key_prefix: cfg.key_prefix.clone(),
            ttl_secs: cfg.ttl_secs,
        })
    }

    /// True once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }
}

impl Uploader for RedisUploader {
    fn upload_file(&mut self, name: &str) -> Result<(), UploadError> {
        if name.is_empty() {
            return Err(UploadError::EmptyName);
        }
        let conn = self.conn.as_mut().ok_or(UploadError::Closed)?;

        let payload = fs::read(name).map_err(|source| UploadError::Read {
            path: PathBuf::from(name),
            source,
        })?;
        let key = storage_key(&self.key_prefix, name);
        let digest = hex::encode(Sha256::digest(&payload));

        match self.ttl_secs {
            Some(ttl) => conn.set_ex::<_, _, ()>(&key, &payload, ttl)?,
            None => conn.set::<_, _, ()>(&key, &payload)?,
        }

        tracing::debug!(
            key = %key,
            bytes = payload.len(),
            sha256 = %digest,
            "stored file contents"
        );
        Ok(())
    }

    fn close(&mut self) -> Result<(), UploadError> {
        if self.conn.take().is_some() {
            tracing::debug!("store connection closed");
        }
        Ok(())
    }
}
