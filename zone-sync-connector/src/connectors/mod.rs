//! Connector implementations

#[cfg(feature = "powerdns")]
pub mod powerdns;
#[cfg(feature = "google-sheets")]
pub mod sheets;

#[cfg(feature = "powerdns")]
pub use powerdns::PowerDnsConnector;
#[cfg(feature = "google-sheets")]
pub use sheets::SheetsConnector;
