//! Google Sheets error mapping

use crate::error::ConnectorError;
use crate::traits::{ConnectorErrorMapper, ErrorContext, RawApiError};

use super::{CONNECTOR_NAME, SheetsConnector};

/// Google APIs report failures as HTTP status plus `{"error": {"code", "message", "status"}}`.
/// Reference: <https://cloud.google.com/apis/design/errors>
impl ConnectorErrorMapper for SheetsConnector {
    fn connector_name(&self) -> &'static str {
        CONNECTOR_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ConnectorError {
        match raw.status {
            // UNAUTHENTICATED
            Some(401) => ConnectorError::InvalidCredentials {
                connector: CONNECTOR_NAME.to_string(),
                raw_message: Some(raw.message),
            },

            // PERMISSION_DENIED: spreadsheet not shared with the service account
            Some(403) => ConnectorError::PermissionDenied {
                connector: CONNECTOR_NAME.to_string(),
                raw_message: Some(raw.message),
            },

            // NOT_FOUND: spreadsheet id or worksheet range does not exist
            Some(404) => ConnectorError::ZoneNotFound {
                connector: CONNECTOR_NAME.to_string(),
                zone_id: context.zone_id.unwrap_or_else(|| "<spreadsheet>".to_string()),
                raw_message: Some(raw.message),
            },

            // INVALID_ARGUMENT: bad range, bad request body
            Some(400) => ConnectorError::InvalidParameter {
                connector: CONNECTOR_NAME.to_string(),
                param: "request".to_string(),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SheetsAuth, SheetsConfig};

    fn connector() -> SheetsConnector {
        SheetsConnector::new(SheetsConfig {
            spreadsheet_id: "sheet-id".to_string(),
            auth: SheetsAuth::AccessToken {
                token: "token".to_string(),
            },
            zone_title_prefix: "D:".to_string(),
            skip_rows: 1,
            api_base: "http://127.0.0.1:1".to_string(),
            token_url: "http://127.0.0.1:1/token".to_string(),
            max_retries: 0,
        })
        .unwrap()
    }

    #[test]
    fn unauthenticated_maps_to_invalid_credentials() {
        let e = connector().map_error(
            RawApiError::with_status(401, "Request had invalid authentication credentials."),
            ErrorContext::default(),
        );
        assert!(matches!(e, ConnectorError::InvalidCredentials { .. }));
    }

    #[test]
    fn permission_denied() {
        let e = connector().map_error(
            RawApiError::with_status(403, "The caller does not have permission"),
            ErrorContext::default(),
        );
        assert!(matches!(e, ConnectorError::PermissionDenied { .. }));
    }

    #[test]
    fn not_found_uses_zone_context() {
        let e = connector().map_error(
            RawApiError::with_status(404, "Requested entity was not found."),
            ErrorContext::zone("example.com."),
        );
        assert!(matches!(
            e,
            ConnectorError::ZoneNotFound { ref zone_id, .. } if zone_id == "example.com."
        ));
    }

    #[test]
    fn invalid_argument_is_invalid_parameter() {
        let e = connector().map_error(
            RawApiError::with_status(400, "Unable to parse range: 'D: x'!A1"),
            ErrorContext::default(),
        );
        assert!(matches!(e, ConnectorError::InvalidParameter { .. }));
    }
}
