//! # zone-sync-connector
//!
//! Store connectors for zone-sync, plus the record/zone/task model they share.
//!
//! A sync run reads every zone from two stores: the **authoritative** store
//! (a DNS server owning the live record set) and the **annotation** store
//! (a spreadsheet holding human-curated comments and owners). Both are reached
//! through the [`ZoneConnector`] trait.
//!
//! ## Supported Connectors
//!
//! | Connector | Feature Flag | Role | Auth Method |
//! |-----------|-------------|------|-------------|
//! | [PowerDNS](https://doc.powerdns.com/authoritative/http-api/) | `powerdns` | authoritative | `X-API-Key` header |
//! | [Google Sheets](https://developers.google.com/sheets/api) | `google-sheets` | annotation | Service-account JWT or bearer token |
//!
//! ## Feature Flags
//!
//! - **`all-connectors`** *(default)*: enable every connector above.
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls instead.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use zone_sync_connector::{create_connector, ConnectorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config: ConnectorConfig = serde_json::from_str(
//!         r#"{"kind":"powerdns","api_url":"http://127.0.0.1:8081","api_key":"secret"}"#,
//!     )?;
//!     let connector = create_connector(config)?;
//!
//!     for zone in connector.fetch_zones().await? {
//!         println!("{} ({} records)", zone.id, zone.records.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Reads return [`ConnectorError`] on any failure. Mutations distinguish a
//! remote answer ([`ApplyOutcome::Rejected`]) from a transport failure (`Err`).
//! Reads are retried with exponential backoff on transient errors; mutations
//! are sent exactly once.

mod config;
mod connectors;
mod error;
mod factory;
mod http_client;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ConnectorError, Result};

// Re-export factory function
pub use factory::create_connector;

// Re-export core trait only (internal traits are not exported)
pub use traits::ZoneConnector;

// Re-export types
pub use types::{
    ApplyOutcome, Comment, Record, RecordKey, StoreRole, Task, TaskKind, Zone, normalize_zone_id,
};

// Re-export configuration
pub use config::ConnectorConfig;
#[cfg(feature = "powerdns")]
pub use config::PowerDnsConfig;
#[cfg(feature = "google-sheets")]
pub use config::{SheetsAuth, SheetsConfig};

// Re-export utils module
pub use utils::log_sanitizer;

// Re-export concrete connectors (behind feature flags)
#[cfg(feature = "powerdns")]
pub use connectors::PowerDnsConnector;

#[cfg(feature = "google-sheets")]
pub use connectors::SheetsConnector;
