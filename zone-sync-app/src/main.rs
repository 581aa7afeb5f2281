//! zone-sync entry point
//!
//! A zero-argument batch job: reads its configuration, runs one sync pass
//! and exits. Exits non-zero only when the run is aborted; tasks a store
//! rejected are reported as warnings and retried by the next run.

use std::process::ExitCode;

use zone_sync_app::{AppConfig, init_logging, log_report};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured by the file that failed to load
            eprintln!("zone-sync: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.log);
    tracing::info!("Starting zone-sync {}", env!("CARGO_PKG_VERSION"));

    match zone_sync_app::run(config).await {
        Ok(report) => {
            log_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
