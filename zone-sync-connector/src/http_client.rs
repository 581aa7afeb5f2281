//! Generic HTTP client tools
//!
//! Reusable request handling shared by every connector. Each connector still
//! builds its own `RequestBuilder` (URL, auth header, body); this module owns
//! sending, logging, reading the body and mapping transport failures.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::ConnectorError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Default connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Create an HTTP client with timeouts configured
pub fn create_http_client(connector_name: &str) -> Result<Client, ConnectorError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ConnectorError::NetworkError {
            connector: connector_name.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns status code and response text
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` for every answered request except 429/502/503/504
    /// * `Err(ConnectorError::RateLimited)` - HTTP 429
    /// * `Err(ConnectorError::ServerError)` - HTTP 502-504
    /// * `Err(ConnectorError::NetworkError | Timeout)` - no answer
    pub async fn execute_request(
        request_builder: RequestBuilder,
        connector_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), ConnectorError> {
        log::debug!("[{connector_name}] {method_name} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ConnectorError::Timeout {
                    connector: connector_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ConnectorError::NetworkError {
                    connector: connector_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{connector_name}] Response Status: {status_code}");

        // Extract Retry-After header (before consuming response body)
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{connector_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ConnectorError::RateLimited {
                connector: connector_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{connector_name}] Server error (HTTP {status_code})");
            return Err(ConnectorError::ServerError {
                connector: connector_name.to_string(),
                status: status_code,
                detail: truncate_for_log(&body),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ConnectorError::NetworkError {
                connector: connector_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{connector_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    pub fn parse_json<T>(response_text: &str, connector_name: &str) -> Result<T, ConnectorError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{connector_name}] JSON parse failed: {e}");
            log::error!(
                "[{connector_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ConnectorError::ParseError {
                connector: connector_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Performs an HTTP request with retries
    ///
    /// Only used for reads: mutations are sent exactly once.
    ///
    /// # Retry strategy
    /// - Retries [`ConnectorError::is_retryable`] errors only
    /// - Exponential backoff: 100ms, 200ms, 400ms, 800ms, ... (maximum 10 seconds)
    /// - `Retry-After` from a 429 is honored (capped at 30 seconds)
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        connector_name: &str,
        method_name: &str,
        url_or_action: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ConnectorError> {
        if max_retries == 0 {
            return Self::execute_request(
                request_builder,
                connector_name,
                method_name,
                url_or_action,
            )
            .await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder can only be sent once
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{connector_name}] Cannot clone request, disabling retry");
                return Self::execute_request(
                    request_builder,
                    connector_name,
                    method_name,
                    url_or_action,
                )
                .await;
            };

            match Self::execute_request(req, connector_name, method_name, url_or_action).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        connector_name,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ConnectorError::NetworkError {
            connector: connector_name.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// Use the server-provided `Retry-After` (capped at 30s) when present,
/// exponential backoff otherwise.
fn retry_delay(error: &ConnectorError, attempt: u32) -> Duration {
    if let ConnectorError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, 800ms, 1.6s, ... capped at 10 seconds
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // Prevent 2^attempt from overflowing
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    let delay_ms = delay_ms.min(10_000);
    Duration::from_millis(delay_ms)
}
