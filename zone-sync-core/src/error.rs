//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use zone_sync_connector::ConnectorError;
use zone_sync_connector::StoreRole;

use crate::types::SyncPhase;

/// Core layer error type
///
/// Every variant is fatal for a sync run. Failures of individual tasks are
/// never raised as errors; they are recorded in the run's
/// [`SyncReport`](crate::SyncReport).
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A store returned no zones at all
    #[error("The {0} store returned no zones")]
    MissingZones(StoreRole),

    /// An authoritative zone has no counterpart in the annotation store
    #[error("Zone {zone_id} exists in the authoritative store but not in the annotation store")]
    UnmatchedZone { zone_id: String },

    /// Reading zones from a store failed
    #[error("Failed to fetch zones from the {role} store: {source}")]
    ConnectorFetch {
        role: StoreRole,
        source: ConnectorError,
    },

    /// A connector call exceeded `SyncOptions::call_timeout`
    #[error("{phase} timed out after {timeout_secs}s")]
    Timeout { phase: SyncPhase, timeout_secs: u64 },
}

impl CoreError {
    /// Whether it is expected behavior (store contents, credentials, ...); used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::MissingZones(_) | Self::UnmatchedZone { .. } => true,
            Self::ConnectorFetch { source, .. } => source.is_expected(),
            Self::Timeout { .. } => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
