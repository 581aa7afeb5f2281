//! Connector factory.

use std::sync::Arc;

use crate::config::ConnectorConfig;
use crate::error::Result;
use crate::traits::ZoneConnector;

#[cfg(feature = "powerdns")]
use crate::connectors::PowerDnsConnector;
#[cfg(feature = "google-sheets")]
use crate::connectors::SheetsConnector;

/// Creates a [`ZoneConnector`] from its configuration.
///
/// The concrete connector is selected by the [`ConnectorConfig`] variant. No
/// network traffic happens here; credentials are only exercised by the first
/// request.
///
/// # Examples
///
/// ```rust,no_run
/// use zone_sync_connector::{create_connector, ConnectorConfig, PowerDnsConfig};
///
/// let connector = create_connector(ConnectorConfig::Powerdns(PowerDnsConfig {
///     api_url: "http://127.0.0.1:8081".to_string(),
///     server_id: "localhost".to_string(),
///     api_key: "your-key".to_string(),
///     max_retries: 2,
/// }))
/// .unwrap();
/// ```
pub fn create_connector(config: ConnectorConfig) -> Result<Arc<dyn ZoneConnector>> {
    match config {
        #[cfg(feature = "powerdns")]
        ConnectorConfig::Powerdns(config) => Ok(Arc::new(PowerDnsConnector::new(config)?)),
        #[cfg(feature = "google-sheets")]
        ConnectorConfig::GoogleSheets(config) => Ok(Arc::new(SheetsConnector::new(config)?)),
    }
}
