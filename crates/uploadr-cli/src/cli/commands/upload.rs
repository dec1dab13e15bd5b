//! `uploadr upload <path>` – upload one file with bounded retry.

use anyhow::{Context, Result};
use uploadr_core::config::UploadrConfig;
use uploadr_core::{RedisUploader, RetryPolicy, RetryingUploader, Uploader};

/// Command-line values that take precedence over `[retry]` in config.toml.
#[derive(Debug, Default, Clone, Copy)]
pub struct UploadOverrides {
    pub attempts: Option<u32>,
    pub interval_secs: Option<f64>,
}

/// Resolve the effective retry policy from config plus overrides.
pub fn effective_policy(cfg: &UploadrConfig, overrides: UploadOverrides) -> Result<RetryPolicy> {
    let mut retry = cfg.retry.clone();
    if let Some(n) = overrides.attempts {
        retry.max_attempts = n;
    }
    if let Some(secs) = overrides.interval_secs {
        retry.retry_interval_secs = secs;
    }
    retry.policy().context("invalid retry settings")
}

pub fn run_upload(cfg: &UploadrConfig, path: &str, overrides: UploadOverrides) -> Result<()> {
    let policy = effective_policy(cfg, overrides)?;
    let store = RedisUploader::connect(&cfg.store).with_context(|| {
        format!("connect to store at {}:{}", cfg.store.host, cfg.store.port)
    })?;
    let mut uploader = RetryingUploader::new(Box::new(store), policy);

    let result = uploader.upload_file(path);
    let closed = uploader.close();
    if let Err(e) = &closed {
        tracing::warn!(error = %e, "closing store connection failed");
    }

    result.with_context(|| format!("upload {path}"))?;
    closed.context("close store connection")?;
    println!("Uploaded {path}");
    Ok(())
}
