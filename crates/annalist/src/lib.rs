//! Annalist - incremental Discord channel exporter.
//!
//! Keeps a local JSON export of one channel's message history up to date.
//! The first run downloads the whole history; later runs append only what is
//! new. Runs once by default, or periodically when `SYNC_INTERVAL_MS` is set
//! and `EXIT_ON_IDLE` is off.
//!
//! # Architecture
//!
//! - `annalist_core` - Export records and snapshot format
//! - `annalist_error` - Error types
//! - `annalist_storage` - Snapshot file resolution and atomic writes
//! - `annalist_sync` - Pagination and the sync engine
//! - `annalist_discord` - Serenity-backed message source
//!
//! This crate wires them together behind the `annalist` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cli;
mod exporter;
mod interval;
mod logging;
mod settings;

pub use cli::Cli;
pub use exporter::{Exporter, RunPlan, RunSummary, run, shutdown_signal};
pub use interval::format_interval;
pub use logging::{LoggingConfig, init_logging};
pub use settings::{
    ConfigOverrides, DEFAULT_CONFIG_FILE, DEFAULT_DOWNLOAD_DIR, DEFAULT_REQUEST_DELAY_MS,
    ExporterConfig, is_valid_channel_id, parse_flag,
};
