//! Connector configuration.
//!
//! Every connector receives its configuration through its constructor; there is
//! no process-wide configuration state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::log_sanitizer::mask_secret;

/// Default number of retries for read requests.
const DEFAULT_MAX_RETRIES: u32 = 2;

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

/// Selects and configures a connector.
///
/// Deserializes from a table with a `kind` tag, e.g.
///
/// ```toml
/// kind = "powerdns"
/// api_url = "http://127.0.0.1:8081"
/// api_key = "secret"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ConnectorConfig {
    /// PowerDNS authoritative server HTTP API. Requires feature `powerdns`.
    #[cfg(feature = "powerdns")]
    Powerdns(PowerDnsConfig),
    /// Google Sheets spreadsheet. Requires feature `google-sheets`.
    #[cfg(feature = "google-sheets")]
    GoogleSheets(SheetsConfig),
}

// ============ PowerDNS ============

#[cfg(feature = "powerdns")]
fn default_server_id() -> String {
    "localhost".to_string()
}

/// PowerDNS HTTP API settings.
#[cfg(feature = "powerdns")]
#[derive(Clone, Serialize, Deserialize)]
pub struct PowerDnsConfig {
    /// Base URL of the webserver, e.g. `http://127.0.0.1:8081`.
    pub api_url: String,
    /// Server id in `/api/v1/servers/{server_id}`.
    #[serde(default = "default_server_id")]
    pub server_id: String,
    /// Value of the `X-API-Key` header.
    pub api_key: String,
    /// Retries for zone reads.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

#[cfg(feature = "powerdns")]
impl fmt::Debug for PowerDnsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PowerDnsConfig")
            .field("api_url", &self.api_url)
            .field("server_id", &self.server_id)
            .field("api_key", &mask_secret(&self.api_key))
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

// ============ Google Sheets ============

#[cfg(feature = "google-sheets")]
fn default_title_prefix() -> String {
    "D:".to_string()
}

#[cfg(feature = "google-sheets")]
fn default_skip_rows() -> usize {
    1
}

#[cfg(feature = "google-sheets")]
fn default_sheets_api_base() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

#[cfg(feature = "google-sheets")]
fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// Google Sheets settings.
#[cfg(feature = "google-sheets")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Spreadsheet id from the document URL.
    pub spreadsheet_id: String,
    /// How requests are authorized.
    pub auth: SheetsAuth,
    /// Worksheet title prefix marking a zone sheet (`"D: example.com"`).
    #[serde(default = "default_title_prefix")]
    pub zone_title_prefix: String,
    /// Rows between the header row and the first record row.
    #[serde(default = "default_skip_rows")]
    pub skip_rows: usize,
    /// Sheets API base URL.
    #[serde(default = "default_sheets_api_base")]
    pub api_base: String,
    /// OAuth token endpoint used for service-account auth.
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Retries for reads.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Google API authorization.
#[cfg(feature = "google-sheets")]
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SheetsAuth {
    /// Service account; a signed JWT is exchanged for a bearer token once per run.
    ServiceAccount {
        client_email: String,
        /// PKCS#8 PEM private key.
        private_key: String,
    },
    /// Pre-issued OAuth bearer token.
    AccessToken { token: String },
}

#[cfg(feature = "google-sheets")]
impl fmt::Debug for SheetsAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceAccount { client_email, .. } => f
                .debug_struct("ServiceAccount")
                .field("client_email", client_email)
                .field("private_key", &"****")
                .finish(),
            Self::AccessToken { token } => f
                .debug_struct("AccessToken")
                .field("token", &mask_secret(token))
                .finish(),
        }
    }
}
