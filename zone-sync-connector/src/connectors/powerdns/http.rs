//! PowerDNS HTTP request methods

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ConnectorError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ConnectorErrorMapper, ErrorContext, RawApiError};

use super::types::PdnsErrorBody;
use super::{CONNECTOR_NAME, PowerDnsConnector};

impl PowerDnsConnector {
    /// Execute a GET request (retried on transient failures)
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let url = format!("{}{path}", self.server_url);
        let request = self.client.get(&url).header("X-API-Key", &self.api_key);

        let (status, body) = HttpUtils::execute_request_with_retry(
            request,
            CONNECTOR_NAME,
            "GET",
            &url,
            self.max_retries,
        )
        .await?;

        if !(200..300).contains(&status) {
            return Err(self.map_error(Self::raw_error(status, &body), ctx));
        }

        HttpUtils::parse_json(&body, CONNECTOR_NAME)
    }

    /// Execute a PATCH request (sent once)
    pub(crate) async fn patch<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<()> {
        let url = format!("{}{path}", self.server_url);
        let body_json =
            serde_json::to_string(body).map_err(|e| ConnectorError::SerializationError {
                connector: CONNECTOR_NAME.to_string(),
                detail: e.to_string(),
            })?;
        log::debug!("[{CONNECTOR_NAME}] Request Body: {body_json}");

        let request = self
            .client
            .patch(&url)
            .header("X-API-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .body(body_json);

        let (status, body) =
            HttpUtils::execute_request(request, CONNECTOR_NAME, "PATCH", &url).await?;

        // PowerDNS answers 204 No Content on success
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(self.map_error(Self::raw_error(status, &body), ctx))
        }
    }

    /// Extract the `error` field of an error body, falling back to the raw text
    fn raw_error(status: u16, body: &str) -> RawApiError {
        let message = serde_json::from_str::<PdnsErrorBody>(body)
            .map(|e| e.error)
            .unwrap_or_else(|_| body.to_string());
        RawApiError::with_status(status, message)
    }
}
