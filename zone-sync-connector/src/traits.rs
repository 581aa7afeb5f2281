use async_trait::async_trait;

use crate::error::{ConnectorError, Result};
use crate::types::{ApplyOutcome, Task, Zone};

/// Raw API error (internal use)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status code, when the remote answered
    pub status: Option<u16>,
    /// Original error message / response body
    pub message: String,
}

impl RawApiError {
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

/// Extra information used while mapping errors (internal use)
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Zone the request was about (for `ZoneNotFound`)
    pub zone_id: Option<String>,
}

impl ErrorContext {
    pub fn zone(zone_id: impl Into<String>) -> Self {
        Self {
            zone_id: Some(zone_id.into()),
        }
    }
}

/// Connector error mapping trait (internal use)
///
/// Each connector maps its raw API failures onto [`ConnectorError`].
pub(crate) trait ConnectorErrorMapper {
    /// Connector identifier
    fn connector_name(&self) -> &'static str;

    /// Map a raw API error onto the unified error type
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ConnectorError;

    /// Shortcut: unknown error (fallback)
    fn unknown_error(&self, raw: RawApiError) -> ConnectorError {
        ConnectorError::Unknown {
            connector: self.connector_name().to_string(),
            status: raw.status,
            raw_message: raw.message,
        }
    }
}

/// A store holding zone data that can be read in full and mutated one task at a time.
#[async_trait]
pub trait ZoneConnector: Send + Sync {
    /// Connector identifier
    fn id(&self) -> &'static str;

    /// Fetch every zone the store knows about, with all of its records.
    ///
    /// Any failure here is fatal for a sync run.
    async fn fetch_zones(&self) -> Result<Vec<Zone>>;

    /// Apply a single task.
    ///
    /// Remote rejections (HTTP 4xx/5xx, missing rows, unsupported kinds) are
    /// returned as [`ApplyOutcome::Rejected`]; `Err` is reserved for transport failures.
    async fn apply_task(&self, task: &Task) -> Result<ApplyOutcome>;
}

/// Fold a mutation result into the outcome/transport-error split of [`ZoneConnector::apply_task`].
pub(crate) fn into_outcome(result: Result<()>) -> Result<ApplyOutcome> {
    match result {
        Ok(()) => Ok(ApplyOutcome::Applied),
        Err(e) if e.is_remote_rejection() => Ok(ApplyOutcome::rejected(e.to_string())),
        Err(e) => Err(e),
    }
}
