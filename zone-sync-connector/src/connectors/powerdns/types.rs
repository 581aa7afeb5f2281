//! PowerDNS API type definitions

use serde::{Deserialize, Serialize};

/// Entry of `GET /servers/{server_id}/zones`
#[derive(Debug, Deserialize)]
pub struct PdnsZoneSummary {
    pub id: String,
    pub name: String,
}

/// `GET /servers/{server_id}/zones/{zone_id}`
#[derive(Debug, Deserialize)]
pub struct PdnsZone {
    pub name: String,
    #[serde(default)]
    pub rrsets: Vec<PdnsRrset>,
}

/// Resource record set as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct PdnsRrset {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub records: Vec<PdnsRecord>,
    #[serde(default)]
    pub comments: Vec<PdnsComment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdnsRecord {
    pub content: String,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdnsComment {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub account: String,
}

/// Body of `PATCH /servers/{server_id}/zones/{zone_id}`
#[derive(Debug, Serialize)]
pub struct PdnsPatchBody {
    pub rrsets: Vec<PdnsRrsetChange>,
}

/// One RRset change inside a PATCH body
#[derive(Debug, Serialize)]
pub struct PdnsRrsetChange {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: u32,
    pub changetype: &'static str,
    pub records: Vec<PdnsRecord>,
    pub comments: Vec<PdnsComment>,
}

/// Error body returned with 4xx/5xx
#[derive(Debug, Deserialize)]
pub struct PdnsErrorBody {
    pub error: String,
}
