//! One full sync run: fetch both stores, reconcile, apply.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use zone_sync_connector::{ApplyOutcome, StoreRole, Task, Zone, ZoneConnector};

use crate::engine::{self, ReconcilePlan};
use crate::error::{CoreError, CoreResult};
use crate::types::{StoreReport, SyncOptions, SyncPhase, SyncReport, TaskReport, TaskStatus};

/// Sync orchestration service
///
/// Calls are strictly sequential: both fetches, then every annotation task in
/// plan order, then every authoritative task in plan order.
pub struct SyncService {
    authoritative: Arc<dyn ZoneConnector>,
    annotation: Arc<dyn ZoneConnector>,
    options: SyncOptions,
}

impl SyncService {
    /// Create a sync service over the two stores
    #[must_use]
    pub fn new(
        authoritative: Arc<dyn ZoneConnector>,
        annotation: Arc<dyn ZoneConnector>,
        options: SyncOptions,
    ) -> Self {
        Self {
            authoritative,
            annotation,
            options,
        }
    }

    /// Run one full reconciliation pass.
    ///
    /// Returns `Err` only for fatal conditions (fetch failure, missing or
    /// unmatched zones, fetch timeout), all of which happen before any task is
    /// applied. Task failures are logged and counted in the report.
    pub async fn run(&self) -> CoreResult<SyncReport> {
        let started_at = Utc::now();

        let authoritative_zones = self
            .fetch(SyncPhase::FetchAuthoritative, StoreRole::Authoritative, &self.authoritative)
            .await?;
        let annotation_zones = self
            .fetch(SyncPhase::FetchAnnotation, StoreRole::Annotation, &self.annotation)
            .await?;

        let plan = engine::reconcile(&authoritative_zones, &annotation_zones)?;
        log::info!(
            "[{}] {} zone(s): {} annotation task(s), {} authoritative task(s), {} zone(s) skipped",
            SyncPhase::Reconcile,
            authoritative_zones.len(),
            plan.tasks_for_annotation.len(),
            plan.tasks_for_authoritative.len(),
            plan.skipped_zones.len()
        );

        let ReconcilePlan {
            tasks_for_authoritative,
            tasks_for_annotation,
            skipped_zones,
        } = plan;

        let mut tasks = Vec::with_capacity(tasks_for_annotation.len() + tasks_for_authoritative.len());
        let annotation = self
            .apply_all(
                SyncPhase::ApplyAnnotation,
                StoreRole::Annotation,
                &self.annotation,
                &tasks_for_annotation,
                &mut tasks,
            )
            .await;
        let authoritative = self
            .apply_all(
                SyncPhase::ApplyAuthoritative,
                StoreRole::Authoritative,
                &self.authoritative,
                &tasks_for_authoritative,
                &mut tasks,
            )
            .await;

        Ok(SyncReport {
            started_at,
            finished_at: Utc::now(),
            dry_run: self.options.dry_run,
            zones: authoritative_zones.len(),
            skipped_zones,
            annotation,
            authoritative,
            tasks,
        })
    }

    async fn fetch(
        &self,
        phase: SyncPhase,
        role: StoreRole,
        connector: &Arc<dyn ZoneConnector>,
    ) -> CoreResult<Vec<Zone>> {
        log::info!("[{phase}] Fetching zones from {}", connector.id());
        let zones = self
            .bounded(phase, connector.fetch_zones())
            .await?
            .map_err(|source| CoreError::ConnectorFetch { role, source })?;

        let records: usize = zones.iter().map(|z| z.records.len()).sum();
        log::info!(
            "[{phase}] {} zone(s), {records} record(s) from {}",
            zones.len(),
            connector.id()
        );
        Ok(zones)
    }

    async fn apply_all(
        &self,
        phase: SyncPhase,
        role: StoreRole,
        connector: &Arc<dyn ZoneConnector>,
        plan: &[Task],
        reports: &mut Vec<TaskReport>,
    ) -> StoreReport {
        let mut summary = StoreReport::new(role, connector.id(), plan.len());

        for task in plan {
            let report = if self.options.dry_run {
                log::info!(
                    "[{phase}] [dry-run] {} {} {} {} in {}",
                    connector.id(),
                    task.kind,
                    task.record.label(),
                    task.record.value,
                    task.zone_id
                );
                TaskReport::new(role, task, TaskStatus::Planned, None)
            } else {
                self.apply_one(phase, role, connector, task).await
            };
            summary.count(report.status);
            reports.push(report);
        }

        if !plan.is_empty() {
            log::info!(
                "[{phase}] {} task(s): {} applied, {} rejected, {} failed",
                summary.planned,
                summary.applied,
                summary.rejected,
                summary.failed
            );
        }
        summary
    }

    /// Apply one task; never fails the run.
    async fn apply_one(
        &self,
        phase: SyncPhase,
        role: StoreRole,
        connector: &Arc<dyn ZoneConnector>,
        task: &Task,
    ) -> TaskReport {
        let (status, detail) = match self.bounded(phase, connector.apply_task(task)).await {
            Ok(Ok(ApplyOutcome::Applied)) => {
                log::info!(
                    "[{phase}] {} {} {} {}: applied",
                    connector.id(),
                    task.kind,
                    task.record.label(),
                    task.record.value
                );
                (TaskStatus::Applied, None)
            }
            Ok(Ok(ApplyOutcome::Rejected { detail })) => {
                log::warn!(
                    "[{phase}] {} {} {} {}: rejected: {detail}",
                    connector.id(),
                    task.kind,
                    task.record.label(),
                    task.record.value
                );
                (TaskStatus::Rejected, Some(detail))
            }
            Ok(Err(e)) => {
                log::warn!(
                    "[{phase}] {} {} {} {}: failed: {e}",
                    connector.id(),
                    task.kind,
                    task.record.label(),
                    task.record.value
                );
                (TaskStatus::Failed, Some(e.to_string()))
            }
            Err(e) => {
                log::warn!(
                    "[{phase}] {} {} {}: {e}",
                    connector.id(),
                    task.kind,
                    task.record.label()
                );
                (TaskStatus::Failed, Some(e.to_string()))
            }
        };
        TaskReport::new(role, task, status, detail)
    }

    /// Await `call`, bounded by `call_timeout` when one is configured
    async fn bounded<T>(&self, phase: SyncPhase, call: impl Future<Output = T>) -> CoreResult<T> {
        match self.options.call_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| CoreError::Timeout {
                    phase,
                    timeout_secs: limit.as_secs(),
                }),
            None => Ok(call.await),
        }
    }
}
