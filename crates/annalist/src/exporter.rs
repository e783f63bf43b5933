//! Process loop: initial sync, optional periodic passes, shutdown.

use crate::{ExporterConfig, format_interval};
use annalist_core::SyncReport;
use annalist_discord::{DiscordChannel, login};
use annalist_error::{AnnalistResult, SourceError};
use annalist_storage::{FileSystemStore, SnapshotStore};
use annalist_sync::{MessageSource, SyncEngine, SyncOptions};
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Whether the exporter stops after the first pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPlan {
    /// One pass, then exit
    Once,
    /// Keep syncing, waiting this long after each pass finishes
    Periodic(Duration),
}

impl RunPlan {
    /// Derive the plan from configuration.
    ///
    /// `exit_on_idle` and a zero interval both mean a single pass.
    pub fn from_config(config: &ExporterConfig) -> Self {
        if *config.exit_on_idle() || config.sync_interval().is_zero() {
            RunPlan::Once
        } else {
            RunPlan::Periodic(*config.sync_interval())
        }
    }
}

/// Outcome of [`Exporter::run`].
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct RunSummary {
    /// Report of the initial pass
    initial: SyncReport,
    /// Passes that completed, including the initial one
    passes: usize,
    /// Periodic passes that failed
    failures: usize,
}

/// Drives sync passes for one channel.
#[derive(Debug, Clone)]
pub struct Exporter<S> {
    engine: SyncEngine<S>,
    plan: RunPlan,
}

impl Exporter<FileSystemStore> {
    /// Exporter writing into the configured download directory.
    pub fn from_config(config: &ExporterConfig) -> Self {
        let store = FileSystemStore::new(config.download_dir().clone());
        let options = SyncOptions::default().with_request_delay(*config.request_delay());
        Self::new(SyncEngine::new(store, options), RunPlan::from_config(config))
    }
}

impl<S> Exporter<S>
where
    S: SnapshotStore,
{
    /// Create an exporter.
    pub fn new(engine: SyncEngine<S>, plan: RunPlan) -> Self {
        Self { engine, plan }
    }

    /// The configured plan.
    pub fn plan(&self) -> RunPlan {
        self.plan
    }

    /// Run the initial pass, then periodic passes until `shutdown` resolves.
    ///
    /// `shutdown` is only observed between passes, so a pass in flight
    /// always finishes and persists. A failed periodic pass is logged and
    /// the schedule continues.
    ///
    /// # Errors
    ///
    /// Returns the error of the initial pass if it fails.
    #[instrument(skip_all, fields(plan = ?self.plan))]
    pub async fn run<M, F>(&self, source: &M, shutdown: F) -> AnnalistResult<RunSummary>
    where
        M: MessageSource + ?Sized,
        F: Future<Output = ()>,
    {
        let initial = self.engine.sync(source).await?;
        log_report(&initial);

        let mut summary = RunSummary {
            initial,
            passes: 1,
            failures: 0,
        };

        let RunPlan::Periodic(interval) = self.plan else {
            info!("Single pass finished, exiting");
            return Ok(summary);
        };

        info!(interval = %format_interval(interval), "Periodic sync enabled");
        tokio::pin!(shutdown);

        loop {
            info!(next_in = %format_interval(interval), "Waiting for next sync");
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }

            match self.engine.sync(source).await {
                Ok(report) => {
                    summary.passes += 1;
                    log_report(&report);
                }
                Err(e) => {
                    summary.failures += 1;
                    error!(error = %e, "Scheduled sync failed, will retry on next tick");
                }
            }
        }

        Ok(summary)
    }
}

fn log_report(report: &SyncReport) {
    if report.is_up_to_date() {
        info!(
            path = %report.file_path().display(),
            total = report.total_messages(),
            "Channel is up to date"
        );
    } else {
        info!(
            path = %report.file_path().display(),
            new = report.new_messages(),
            total = report.total_messages(),
            mode = %report.mode(),
            "Sync complete"
        );
    }
}

/// Resolve when the process receives `SIGINT` or `SIGTERM`.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Log in, resolve the configured channel and run the exporter until done.
///
/// # Errors
///
/// Fails if login, channel lookup or the initial pass fails.
#[instrument(skip_all, fields(channel_id = %config.channel_id()))]
pub async fn run(config: &ExporterConfig) -> AnnalistResult<RunSummary> {
    info!(download_dir = %config.download_dir().display(), "Starting Discord channel export");

    let http = login(config.token()).await.map_err(SourceError::from)?;
    let channel = DiscordChannel::connect(http, config.channel_id())
        .await
        .map_err(SourceError::from)?;

    Exporter::from_config(config)
        .run(&channel, shutdown_signal())
        .await
}
