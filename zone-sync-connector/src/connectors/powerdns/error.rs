//! PowerDNS error mapping

use crate::error::ConnectorError;
use crate::traits::{ConnectorErrorMapper, ErrorContext, RawApiError};

use super::{CONNECTOR_NAME, PowerDnsConnector};

/// PowerDNS reports failures through HTTP status plus `{"error": "..."}`.
/// Reference: <https://doc.powerdns.com/authoritative/http-api/index.html#errors>
impl ConnectorErrorMapper for PowerDnsConnector {
    fn connector_name(&self) -> &'static str {
        CONNECTOR_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ConnectorError {
        match raw.status {
            // Missing or wrong X-API-Key
            Some(401) => ConnectorError::InvalidCredentials {
                connector: CONNECTOR_NAME.to_string(),
                raw_message: Some(raw.message),
            },

            Some(403) => ConnectorError::PermissionDenied {
                connector: CONNECTOR_NAME.to_string(),
                raw_message: Some(raw.message),
            },

            // Unknown zone: 404, or 422 "Could not find domain" on older versions
            Some(404) => self.zone_not_found(raw, context),
            Some(422) if raw.message.contains("Could not find domain") => {
                self.zone_not_found(raw, context)
            }

            // RRset validation failures (bad content, duplicate records, bad TTL, ...)
            Some(400 | 422) => ConnectorError::InvalidParameter {
                connector: CONNECTOR_NAME.to_string(),
                param: "rrsets".to_string(),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}

impl PowerDnsConnector {
    fn zone_not_found(&self, raw: RawApiError, context: ErrorContext) -> ConnectorError {
        ConnectorError::ZoneNotFound {
            connector: self.connector_name().to_string(),
            zone_id: context.zone_id.unwrap_or_else(|| "<unknown>".to_string()),
            raw_message: Some(raw.message),
        }
    }
}
