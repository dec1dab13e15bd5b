//! CLI for uploadr.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uploadr_core::config::{self, UploadrConfig};

use commands::{run_show_config, run_upload, UploadOverrides};

/// Top-level CLI for uploadr.
#[derive(Debug, Parser)]
#[command(name = "uploadr")]
#[command(about = "uploadr: upload a file to a key-value store with bounded retry", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/uploadr/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Upload a file's contents under `<key_prefix>:<path>`.
    Upload {
        /// File to upload; the path also names the stored key.
        path: String,
        /// Maximum attempts, including the first (overrides config).
        #[arg(long, value_name = "N")]
        attempts: Option<u32>,
        /// Pause between attempts in seconds (overrides config).
        #[arg(long, value_name = "SECS")]
        interval_secs: Option<f64>,
    },

    /// Show the config file path and effective configuration.
    Config,
}

fn load_config(path: Option<&PathBuf>) -> Result<UploadrConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_ref())?;
        tracing::debug!(
            host = %cfg.store.host,
            port = cfg.store.port,
            retry = ?cfg.retry,
            "loaded config"
        );

        match cli.command {
            CliCommand::Upload {
                path,
                attempts,
                interval_secs,
            } => {
                let overrides = UploadOverrides {
                    attempts,
                    interval_secs,
                };
                run_upload(&cfg, &path, overrides)?;
            }
            CliCommand::Config => run_show_config(&cfg, cli.config.as_deref())?,
        }

        Ok(())
    }
}
