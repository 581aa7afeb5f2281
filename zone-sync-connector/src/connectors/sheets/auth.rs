//! Bearer tokens for the Sheets API.
//!
//! A service account signs an RS256 JWT assertion and trades it at the OAuth
//! token endpoint; the resulting token is cached until shortly before expiry.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::SheetsAuth;
use crate::error::{ConnectorError, Result};
use crate::http_client::HttpUtils;
use crate::utils::log_sanitizer::truncate_for_log;

use super::CONNECTOR_NAME;
use super::types::TokenResponse;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Lifetime requested for an assertion (Google's maximum).
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Refresh a cached token this long before it expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

pub(crate) enum TokenSource {
    Static(String),
    ServiceAccount {
        client_email: String,
        key: EncodingKey,
        token_url: String,
        cached: Mutex<Option<CachedToken>>,
    },
}

impl TokenSource {
    pub fn new(auth: SheetsAuth, token_url: String) -> Result<Self> {
        match auth {
            SheetsAuth::AccessToken { token } => {
                if token.trim().is_empty() {
                    return Err(invalid_credentials("access token is empty"));
                }
                Ok(Self::Static(token))
            }
            SheetsAuth::ServiceAccount {
                client_email,
                private_key,
            } => {
                // Keys pasted from JSON key files often keep escaped newlines
                let pem = private_key.replace("\\n", "\n");
                let key = EncodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|e| invalid_credentials(&format!("unreadable private key: {e}")))?;
                Ok(Self::ServiceAccount {
                    client_email,
                    key,
                    token_url,
                    cached: Mutex::new(None),
                })
            }
        }
    }

    /// Current bearer token, exchanging a fresh assertion when needed.
    pub async fn token(&self, client: &Client) -> Result<String> {
        match self {
            Self::Static(token) => Ok(token.clone()),
            Self::ServiceAccount {
                client_email,
                key,
                token_url,
                cached,
            } => {
                let mut cached = cached.lock().await;
                let now = Utc::now();
                if let Some(entry) = cached.as_ref()
                    && entry.expires_at > now + Duration::seconds(EXPIRY_MARGIN_SECS)
                {
                    return Ok(entry.token.clone());
                }

                let assertion = sign_assertion(client_email, key, token_url, now)?;
                let response = exchange(client, token_url, &assertion).await?;
                let expires_at = now
                    + Duration::seconds(response.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS));
                log::debug!("[{CONNECTOR_NAME}] Access token obtained for {client_email}");

                *cached = Some(CachedToken {
                    token: response.access_token.clone(),
                    expires_at,
                });
                Ok(response.access_token)
            }
        }
    }
}

fn sign_assertion(
    client_email: &str,
    key: &EncodingKey,
    token_url: &str,
    now: DateTime<Utc>,
) -> Result<String> {
    let claims = Claims {
        iss: client_email,
        scope: SHEETS_SCOPE,
        aud: token_url,
        iat: now.timestamp(),
        exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
    };
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, key)
        .map_err(|e| invalid_credentials(&format!("failed to sign assertion: {e}")))
}

async fn exchange(client: &Client, token_url: &str, assertion: &str) -> Result<TokenResponse> {
    let form = format!(
        "grant_type={}&assertion={}",
        urlencoding::encode(JWT_BEARER_GRANT),
        urlencoding::encode(assertion)
    );
    let request = client
        .post(token_url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(form);

    let (status, body) =
        HttpUtils::execute_request(request, CONNECTOR_NAME, "POST", token_url).await?;
    if !(200..300).contains(&status) {
        return Err(ConnectorError::InvalidCredentials {
            connector: CONNECTOR_NAME.to_string(),
            raw_message: Some(truncate_for_log(&body)),
        });
    }
    HttpUtils::parse_json(&body, CONNECTOR_NAME)
}

fn invalid_credentials(detail: &str) -> ConnectorError {
    ConnectorError::InvalidCredentials {
        connector: CONNECTOR_NAME.to_string(),
        raw_message: Some(detail.to_string()),
    }
}
