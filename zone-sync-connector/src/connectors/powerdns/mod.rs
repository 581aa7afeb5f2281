//! PowerDNS authoritative server connector

mod connector;
mod error;
mod http;
mod types;

use reqwest::Client;

use crate::config::PowerDnsConfig;
use crate::error::{ConnectorError, Result};
use crate::http_client::create_http_client;

pub(crate) use types::{PdnsComment, PdnsRecord, PdnsRrset, PdnsZone, PdnsZoneSummary};

pub(crate) const CONNECTOR_NAME: &str = "powerdns";

/// PowerDNS connector, the authoritative side of a sync run.
pub struct PowerDnsConnector {
    pub(crate) client: Client,
    /// `{api_url}/api/v1/servers/{server_id}`
    pub(crate) server_url: String,
    pub(crate) api_key: String,
    pub(crate) max_retries: u32,
}

impl PowerDnsConnector {
    pub fn new(config: PowerDnsConfig) -> Result<Self> {
        let api_url = config.api_url.trim().trim_end_matches('/');
        if api_url.is_empty() {
            return Err(invalid_config("api_url", "must not be empty"));
        }
        if config.api_key.is_empty() {
            return Err(invalid_config("api_key", "must not be empty"));
        }
        if config.server_id.is_empty() {
            return Err(invalid_config("server_id", "must not be empty"));
        }

        Ok(Self {
            client: create_http_client(CONNECTOR_NAME)?,
            server_url: format!("{api_url}/api/v1/servers/{}", config.server_id),
            api_key: config.api_key,
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
