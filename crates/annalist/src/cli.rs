//! Command-line interface for Annalist.

use crate::ConfigOverrides;
use clap::Parser;
use std::path::PathBuf;

/// Export a Discord channel's history to JSON and keep it up to date.
///
/// Settings come from `.env`, an optional `annalist.toml` and environment
/// variables; the flags below take precedence over all of them.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "annalist")]
#[command(about = "Incrementally export a Discord channel to JSON", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Channel to export (overrides CHANNEL_ID)
    #[arg(long)]
    pub channel_id: Option<String>,

    /// Directory for export files (overrides DOWNLOAD_DIR)
    #[arg(short, long)]
    pub download_dir: Option<PathBuf>,

    /// Run a single sync pass and exit, ignoring SYNC_INTERVAL_MS
    #[arg(long)]
    pub once: bool,

    /// Configuration file (default: ./annalist.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Flag values that take precedence over every other config source.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            channel_id: self.channel_id.clone(),
            download_dir: self.download_dir.clone(),
            once: self.once,
            json_logs: self.json_logs,
        }
    }
}
