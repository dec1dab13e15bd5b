//! `uploadr config` – show where config lives and what is in effect.

use anyhow::Result;
use std::path::Path;
use uploadr_core::config::{self, UploadrConfig};

pub fn run_show_config(cfg: &UploadrConfig, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    println!("# {}", path.display());
    print!("{}", cfg.to_redacted_toml()?);
    Ok(())
}
