//! Google Sheets connector
//!
//! One worksheet per zone, titled `<prefix> <zone name>` (`"D: example.com"`).
//! The first row names the columns; `skip_rows` rows below it are descriptive
//! and never hold records.

mod auth;
mod connector;
mod error;
mod http;
mod sheet;
mod types;

use reqwest::Client;

use crate::config::SheetsConfig;
use crate::error::{ConnectorError, Result};
use crate::http_client::create_http_client;

use auth::TokenSource;

pub(crate) const CONNECTOR_NAME: &str = "google-sheets";

/// Google Sheets connector, the annotation side of a sync run.
pub struct SheetsConnector {
    pub(crate) client: Client,
    /// `{api_base}/spreadsheets/{spreadsheet_id}`
    pub(crate) spreadsheet_url: String,
    pub(crate) auth: TokenSource,
    pub(crate) title_prefix: String,
    pub(crate) skip_rows: usize,
    pub(crate) max_retries: u32,
}

impl SheetsConnector {
    pub fn new(config: SheetsConfig) -> Result<Self> {
        let spreadsheet_id = config.spreadsheet_id.trim();
        if spreadsheet_id.is_empty() {
            return Err(invalid_config("spreadsheet_id", "must not be empty"));
        }
        if config.zone_title_prefix.is_empty() {
            return Err(invalid_config("zone_title_prefix", "must not be empty"));
        }
        let api_base = config.api_base.trim().trim_end_matches('/');

        Ok(Self {
            client: create_http_client(CONNECTOR_NAME)?,
            spreadsheet_url: format!("{api_base}/spreadsheets/{spreadsheet_id}"),
            auth: TokenSource::new(config.auth, config.token_url)?,
            title_prefix: config.zone_title_prefix,
            skip_rows: config.skip_rows,
            max_retries: config.max_retries,
        })
    }
}

fn invalid_config(param: &str, detail: &str) -> ConnectorError {
    ConnectorError::InvalidParameter {
        connector: CONNECTOR_NAME.to_string(),
        param: param.to_string(),
        detail: detail.to_string(),
    }
}
