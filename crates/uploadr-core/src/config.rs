use anyhow::{bail, Context, Result};
use redis::{ConnectionInfo, IntoConnectionInfo, RedisResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::{PolicyError, RetryPolicy};

/// Connection and key layout for the key-value store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    /// Logical database index.
    pub database: i64,
    /// Optional password; `REDIS_PASSWORD` (or `REDIS_PASS`) overrides it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Namespace prepended to every key (`"{key_prefix}:{file name}"`).
    pub key_prefix: String,
    pub connect_timeout_secs: u64,
    /// Optional expiry for uploaded keys, in seconds (None = keep forever).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_secs: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 6379,
            database: 0,
            password: None,
            key_prefix: "files".into(),
            connect_timeout_secs: 5,
            ttl_secs: None,
        }
    }
}

impl StoreConfig {
    /// `redis://host:port/db`. The password is never part of the URL; see
    /// [`StoreConfig::connection_info`].
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.database)
    }

    /// Connection parameters for the client, with the password passed through
    /// verbatim (no URL encoding involved).
    pub fn connection_info(&self) -> RedisResult<ConnectionInfo> {
        let mut info = self.redis_url().into_connection_info()?;
        info.redis.password = self.password.clone().filter(|pw| !pw.is_empty());
        Ok(info)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Reject values the store would refuse on every attempt.
    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout_secs == 0 {
            bail!("store.connect_timeout_secs must be at least 1");
        }
        if self.ttl_secs == Some(0) {
            bail!("store.ttl_secs must be at least 1 (omit it to keep keys forever)");
        }
        Ok(())
    }
}

/// Retry parameters (`[retry]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per upload (including the first).
    pub max_attempts: u32,
    /// Fixed pause between attempts in seconds (e.g. 0.25 = 250ms).
    pub retry_interval_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_interval_secs: 5.0,
        }
    }
}

impl RetryConfig {
    /// Validated policy built from these values.
    pub fn policy(&self) -> Result<RetryPolicy, PolicyError> {
        RetryPolicy::from_secs_f64(self.max_attempts, self.retry_interval_secs)
    }
}

/// Global configuration loaded from `~/.config/uploadr/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadrConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl UploadrConfig {
    /// Apply environment overrides (store credential).
    pub fn apply_env_overrides(&mut self) {
        if let Ok(pw) = env::var("REDIS_PASSWORD").or_else(|_| env::var("REDIS_PASS")) {
            self.store.password = Some(pw);
        }
    }

    /// TOML rendering with the password masked, for display.
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        if shown.store.password.is_some() {
            shown.store.password = Some("********".into());
        }
        Ok(toml::to_string_pretty(&shown)?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("uploadr")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UploadrConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UploadrConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        let mut cfg = default_cfg;
        cfg.apply_env_overrides();
        return Ok(cfg);
    }
    load_from(&path)
}

/// Load configuration from a specific file.
pub fn load_from(path: &Path) -> Result<UploadrConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let mut cfg: UploadrConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.apply_env_overrides();
    cfg.store
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
