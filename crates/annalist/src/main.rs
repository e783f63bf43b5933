//! Annalist CLI binary.

use annalist::{Cli, ExporterConfig, LoggingConfig, init_logging, run};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = ExporterConfig::load(cli.config.as_deref(), &cli.overrides());

    let json_logs = match &config {
        Ok(config) => *config.json_logs(),
        Err(_) => cli.json_logs,
    };
    let logging = LoggingConfig::new()
        .with_verbose(cli.verbose)
        .with_json_logs(json_logs);
    if let Err(e) = init_logging(&logging) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(&config).await {
        Ok(summary) => {
            info!(
                passes = summary.passes(),
                failures = summary.failures(),
                "Exporter stopped"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Export failed");
            ExitCode::FAILURE
        }
    }
}
