//! zone-sync application bootstrap
//!
//! Builds both connectors from [`AppConfig`], runs one [`SyncService`] pass and
//! summarizes the result. The `zone-sync` binary is a thin wrapper around
//! [`run`].

pub mod config;
pub mod logging;

use anyhow::Context;
use zone_sync_connector::create_connector;
use zone_sync_core::{SyncReport, SyncService, TaskStatus};

pub use config::AppConfig;
pub use logging::init_logging;

/// Run one sync pass with `config`.
///
/// Connector construction errors and fatal run errors are returned; task
/// failures are part of the report.
pub async fn run(config: AppConfig) -> anyhow::Result<SyncReport> {
    let authoritative = create_connector(config.authoritative)
        .context("Failed to set up the authoritative store")?;
    let annotation =
        create_connector(config.annotation).context("Failed to set up the annotation store")?;

    tracing::info!(
        "Syncing {} (authoritative) with {} (annotation)",
        authoritative.id(),
        annotation.id()
    );

    let service = SyncService::new(authoritative, annotation, config.sync.options());
    let report = service.run().await.context("Sync run aborted")?;
    Ok(report)
}

/// Log the outcome of a run, one line per store plus every unsynced task.
pub fn log_report(report: &SyncReport) {
    let elapsed = report.finished_at - report.started_at;
    let mode = if report.dry_run { " (dry run)" } else { "" };
    tracing::info!(
        "Sync finished{mode} in {}ms: {} zone(s), {} skipped",
        elapsed.num_milliseconds(),
        report.zones,
        report.skipped_zones.len()
    );

    for store in [&report.annotation, &report.authoritative] {
        tracing::info!(
            "{} store ({}): {} planned, {} applied, {} rejected, {} failed",
            store.role,
            store.connector,
            store.planned,
            store.applied,
            store.rejected,
            store.failed
        );
    }

    for task in report
        .tasks
        .iter()
        .filter(|t| matches!(t.status, TaskStatus::Rejected | TaskStatus::Failed))
    {
        tracing::warn!(
            "Unsynced: {} {} [{} {}] {} in {}: {}",
            task.store,
            task.kind,
            task.name,
            task.record_type,
            task.value,
            task.zone_id,
            task.detail.as_deref().unwrap_or("-")
        );
    }
}
