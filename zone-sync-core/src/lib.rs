//! zone-sync core library
//!
//! Provides the logic of a sync run between an authoritative DNS store and an
//! annotation spreadsheet:
//! - the reconciliation engine ([`engine::reconcile`]), a pure function from
//!   the two zone lists to the tasks that converge them
//! - the sync service ([`SyncService`]), which fetches, reconciles and applies
//!   through two [`ZoneConnector`](zone_sync_connector::ZoneConnector)s
//!
//! This library performs no I/O of its own; all store access goes through the
//! connectors it is given.

pub mod engine;
pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use engine::{reconcile, ReconcilePlan};
pub use error::{CoreError, CoreResult};
pub use services::SyncService;
pub use types::{StoreReport, SyncOptions, SyncPhase, SyncReport, TaskReport, TaskStatus};
