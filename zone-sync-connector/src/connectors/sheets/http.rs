//! Google Sheets HTTP request methods

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ConnectorError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ConnectorErrorMapper, ErrorContext, RawApiError};

use super::types::GoogleErrorBody;
use super::{CONNECTOR_NAME, SheetsConnector};

impl SheetsConnector {
    /// Execute a GET request relative to the spreadsheet (retried on transient failures)
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let url = format!("{}{path}", self.spreadsheet_url);
        let token = self.auth.token(&self.client).await?;
        let request = self.client.get(&url).bearer_auth(token);

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

    /// Execute a mutating request with a JSON body (sent once)
    pub(crate) async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<()> {
        let url = format!("{}{path}", self.spreadsheet_url);
        let body_json =
            serde_json::to_string(body).map_err(|e| ConnectorError::SerializationError {
                connector: CONNECTOR_NAME.to_string(),
                detail: e.to_string(),
            })?;
        log::debug!("[{CONNECTOR_NAME}] Request Body: {body_json}");

        let token = self.auth.token(&self.client).await?;
        let method_name = method.to_string();
        let request = self
            .client
            .request(method, &url)
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .body(body_json);

        let (status, body) =
            HttpUtils::execute_request(request, CONNECTOR_NAME, &method_name, &url).await?;

        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(self.map_error(Self::raw_error(status, &body), ctx))
        }
    }

    /// Extract `error.message` of a Google error body, falling back to the raw text
    fn raw_error(status: u16, body: &str) -> RawApiError {
        let message = serde_json::from_str::<GoogleErrorBody>(body)
            .map(|e| {
                if e.error.status.is_empty() {
                    e.error.message
                } else {
                    format!("{}: {}", e.error.status, e.error.message)
                }
            })
            .unwrap_or_else(|_| body.to_string());
        RawApiError::with_status(status, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_error_reads_google_envelope() {
        let raw = SheetsConnector::raw_error(
            403,
            r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#,
        );
        assert_eq!(raw.status, Some(403));
        assert_eq!(
            raw.message,
            "PERMISSION_DENIED: The caller does not have permission"
        );
    }

    #[test]
    fn raw_error_falls_back_to_body() {
        let raw = SheetsConnector::raw_error(500, "<html>oops</html>");
        assert_eq!(raw.message, "<html>oops</html>");
    }
}
