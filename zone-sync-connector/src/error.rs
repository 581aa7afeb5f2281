use serde::{Deserialize, Serialize};

/// Unified error type for all connector operations.
///
/// Each variant carries a `connector` field identifying which connector produced
/// the error, plus variant-specific context. All variants are serializable so a
/// run summary can embed them.
///
/// # Transport failures vs. remote rejections
///
/// [`ZoneConnector::apply_task`](crate::ZoneConnector::apply_task) only returns
/// `Err` for failures where the remote store never gave an answer
/// ([`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout), ...).
/// Answers such as HTTP 429 or 503 are remote rejections; see
/// [`is_remote_rejection`](Self::is_remote_rejection).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ConnectorError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Connector that produced the error.
        connector: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Connector that produced the error.
        connector: String,
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Connector that produced the error.
        connector: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original response body, if available.
        raw_message: Option<String>,
    },

    /// The remote answered with a gateway/availability error (HTTP 502-504).
    ServerError {
        /// Connector that produced the error.
        connector: String,
        /// HTTP status code.
        status: u16,
        /// Original response body.
        detail: String,
    },

    /// The configured credentials were rejected.
    InvalidCredentials {
        /// Connector that produced the error.
        connector: String,
        /// Original error message from the remote API, if available.
        raw_message: Option<String>,
    },

    /// The credentials are valid but lack permission for the operation.
    PermissionDenied {
        /// Connector that produced the error.
        connector: String,
        /// Original error message from the remote API, if available.
        raw_message: Option<String>,
    },

    /// The requested zone (or worksheet backing it) does not exist.
    ZoneNotFound {
        /// Connector that produced the error.
        connector: String,
        /// Zone id that was not found.
        zone_id: String,
        /// Original error message from the remote API, if available.
        raw_message: Option<String>,
    },

    /// A configuration value or request parameter is invalid.
    InvalidParameter {
        /// Connector that produced the error.
        connector: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Failed to parse the remote API response.
    ParseError {
        /// Connector that produced the error.
        connector: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body or sign a token.
    SerializationError {
        /// Connector that produced the error.
        connector: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// The connector cannot perform the requested operation at all.
    Unsupported {
        /// Connector that produced the error.
        connector: String,
        /// What was attempted.
        operation: String,
    },

    /// An unrecognized error from the remote API.
    Unknown {
        /// Connector that produced the error.
        connector: String,
        /// HTTP status code, if there was a response.
        status: Option<u16>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ConnectorError {
    /// Whether this is an expected condition (bad config, missing zone, ...), used for log levels.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::ZoneNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::Unsupported { .. }
        )
    }

    /// Transient failures that may succeed when the same read is repeated.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. }
                | Self::Timeout { .. }
                | Self::RateLimited { .. }
                | Self::ServerError { .. }
        )
    }

    /// The remote store answered, but refused or could not serve the request.
    ///
    /// During task application these are reported as
    /// [`ApplyOutcome::Rejected`](crate::ApplyOutcome::Rejected) instead of an error.
    #[must_use]
    pub fn is_remote_rejection(&self) -> bool {
        !matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }
}

impl std::fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { connector, detail } => {
                write!(f, "[{connector}] Network error: {detail}")
            }
            Self::Timeout { connector, detail } => {
                write!(f, "[{connector}] Request timeout: {detail}")
            }
            Self::RateLimited {
                connector,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{connector}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{connector}] Rate limited")
                }
            }
            Self::ServerError {
                connector,
                status,
                detail,
            } => {
                write!(f, "[{connector}] Server error (HTTP {status}): {detail}")
            }
            Self::InvalidCredentials {
                connector,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{connector}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{connector}] Invalid credentials")
                }
            }
            Self::PermissionDenied {
                connector,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{connector}] Permission denied: {msg}")
                } else {
                    write!(f, "[{connector}] Permission denied")
                }
            }
            Self::ZoneNotFound {
                connector,
                zone_id,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{connector}] Zone '{zone_id}' not found: {msg}")
                } else {
                    write!(f, "[{connector}] Zone '{zone_id}' not found")
                }
            }
            Self::InvalidParameter {
                connector,
                param,
                detail,
            } => {
                write!(f, "[{connector}] Invalid parameter '{param}': {detail}")
            }
            Self::ParseError { connector, detail } => {
                write!(f, "[{connector}] Parse error: {detail}")
            }
            Self::SerializationError { connector, detail } => {
                write!(f, "[{connector}] Serialization error: {detail}")
            }
            Self::Unsupported {
                connector,
                operation,
            } => {
                write!(f, "[{connector}] Unsupported operation: {operation}")
            }
            Self::Unknown {
                connector,
                status,
                raw_message,
            } => match status {
                Some(status) => write!(f, "[{connector}] HTTP {status}: {raw_message}"),
                None => write!(f, "[{connector}] {raw_message}"),
            },
        }
    }
}

impl std::error::Error for ConnectorError {}

/// Convenience type alias for `Result<T, ConnectorError>`.
pub type Result<T> = std::result::Result<T, ConnectorError>;
