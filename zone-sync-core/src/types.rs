//! Sync run options and report types

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use zone_sync_connector::{StoreRole, Task, TaskKind};

/// Phase of a sync run, used as the log prefix of every event it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncPhase {
    FetchAuthoritative,
    FetchAnnotation,
    Reconcile,
    ApplyAnnotation,
    ApplyAuthoritative,
}

impl SyncPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FetchAuthoritative => "fetch-authoritative",
            Self::FetchAnnotation => "fetch-annotation",
            Self::Reconcile => "reconcile",
            Self::ApplyAnnotation => "apply-annotation",
            Self::ApplyAuthoritative => "apply-authoritative",
        }
    }
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options of a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Upper bound for every single connector call; `None` waits indefinitely
    pub call_timeout: Option<Duration>,
    /// Compute and log the plan without applying any task
    pub dry_run: bool,
}

/// What happened to one task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// The store accepted the mutation
    Applied,
    /// The store answered with a rejection
    Rejected,
    /// No answer: transport failure or timeout
    Failed,
    /// Not attempted (dry run)
    Planned,
}

/// Outcome of one task of a run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReport {
    pub store: StoreRole,
    pub kind: TaskKind,
    pub zone_id: String,
    pub name: String,
    pub record_type: String,
    pub value: String,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl TaskReport {
    pub fn new(store: StoreRole, task: &Task, status: TaskStatus, detail: Option<String>) -> Self {
        Self {
            store,
            kind: task.kind,
            zone_id: task.zone_id.clone(),
            name: task.record.name.clone(),
            record_type: task.record.record_type.clone(),
            value: task.record.value.clone(),
            status,
            detail,
        }
    }
}

/// Per-store task counters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreReport {
    pub role: StoreRole,
    /// Connector id (`powerdns`, `google-sheets`, ...)
    pub connector: String,
    pub planned: usize,
    pub applied: usize,
    pub rejected: usize,
    pub failed: usize,
}

impl StoreReport {
    pub fn new(role: StoreRole, connector: impl Into<String>, planned: usize) -> Self {
        Self {
            role,
            connector: connector.into(),
            planned,
            applied: 0,
            rejected: 0,
            failed: 0,
        }
    }

    pub(crate) fn count(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::Applied => self.applied += 1,
            TaskStatus::Rejected => self.rejected += 1,
            TaskStatus::Failed => self.failed += 1,
            TaskStatus::Planned => {}
        }
    }

    /// Tasks that left their record un-synced
    pub fn unsynced(&self) -> usize {
        self.rejected + self.failed
    }
}

/// Summary of one completed sync run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    /// Zones present in both stores
    pub zones: usize,
    /// Annotation-only zones that were not reconciled
    pub skipped_zones: Vec<String>,
    pub annotation: StoreReport,
    pub authoritative: StoreReport,
    /// Every task in application order (annotation store first)
    pub tasks: Vec<TaskReport>,
}

impl SyncReport {
    /// Whether any task was rejected or failed
    pub fn has_failures(&self) -> bool {
        self.annotation.unsynced() + self.authoritative.unsynced() > 0
    }

    /// Whether the stores already agreed
    pub fn is_noop(&self) -> bool {
        self.tasks.is_empty()
    }
}
