//! Shared helpers for connector tests against a local mock server

#![allow(dead_code)]

use serde_json::Value;
use wiremock::MockServer;
use wiremock::http::Method;

use zone_sync_connector::{PowerDnsConfig, SheetsAuth, SheetsConfig};

pub const PDNS_API_KEY: &str = "test-api-key";
pub const SHEETS_TOKEN: &str = "ya29.test-token";
pub const SPREADSHEET_ID: &str = "sheet-1";

pub fn powerdns_config(server: &MockServer) -> PowerDnsConfig {
    PowerDnsConfig {
        api_url: server.uri(),
        server_id: "localhost".to_string(),
        api_key: PDNS_API_KEY.to_string(),
        max_retries: 2,
    }
}

pub fn sheets_config(server: &MockServer) -> SheetsConfig {
    SheetsConfig {
        spreadsheet_id: SPREADSHEET_ID.to_string(),
        auth: SheetsAuth::AccessToken {
            token: SHEETS_TOKEN.to_string(),
        },
        zone_title_prefix: "D:".to_string(),
        skip_rows: 1,
        api_base: server.uri(),
        token_url: format!("{}/token", server.uri()),
        max_retries: 2,
    }
}

/// JSON bodies of every request the server received with `method`.
pub async fn bodies_of(server: &MockServer, method: Method) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method == method)
        .filter_map(|r| r.body_json::<Value>().ok())
        .collect()
}
