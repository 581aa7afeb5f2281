//! Record, zone and task model shared by every connector and the sync engine.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============ Record Types ============

/// Human-curated annotation attached to a record.
///
/// Both fields default to empty strings when a store has nothing recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    /// Free-form description.
    pub content: String,
    /// Owner of the record.
    pub account: String,
}

impl Comment {
    pub fn new(content: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            account: account.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.account.is_empty()
    }
}

/// A single DNS resource record plus its annotation metadata.
///
/// Identity for matching is the `(name, record_type, value)` triple; see [`Record::key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Fully-qualified owner name as the authoritative store spells it (e.g. `"www.example.com."`).
    pub name: String,
    /// Record type (e.g. `"A"`, `"MX"`).
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record content.
    pub value: String,
    /// Time to live in seconds, as a trimmed decimal string.
    pub ttl: String,
    /// Annotation metadata.
    #[serde(default)]
    pub comment: Comment,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        value: impl Into<String>,
        ttl: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            value: value.into(),
            ttl: ttl.into().trim().to_string(),
            comment: Comment::default(),
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = comment;
        self
    }

    /// Identity triple used to pair records across stores.
    pub fn key(&self) -> RecordKey<'_> {
        RecordKey {
            name: &self.name,
            record_type: &self.record_type,
            value: &self.value,
        }
    }

    /// Short `[name type]` label for log lines.
    pub fn label(&self) -> String {
        format!("[{} {}]", self.name, self.record_type)
    }
}

/// Borrowed `(name, type, value)` identity of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordKey<'a> {
    pub name: &'a str,
    pub record_type: &'a str,
    pub value: &'a str,
}

/// A DNS zone, identified by a normalized id with trailing dot (e.g. `"example.com."`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub records: Vec<Record>,
}

impl Zone {
    pub fn new(id: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            id: id.into(),
            records,
        }
    }
}

/// Ensure a zone name carries exactly one trailing dot.
pub fn normalize_zone_id(name: &str) -> String {
    format!("{}.", name.trim().trim_end_matches('.'))
}

// ============ Task Types ============

/// Kind of mutation a [`Task`] asks a connector to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Add,
    Update,
    Delete,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// A single mutation instruction targeted at one store.
///
/// `record` is always fully populated; connectors never have to merge partial data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub kind: TaskKind,
    pub zone_id: String,
    pub record: Record,
}

impl Task {
    pub fn add(zone_id: impl Into<String>, record: Record) -> Self {
        Self {
            kind: TaskKind::Add,
            zone_id: zone_id.into(),
            record,
        }
    }

    pub fn update(zone_id: impl Into<String>, record: Record) -> Self {
        Self {
            kind: TaskKind::Update,
            zone_id: zone_id.into(),
            record,
        }
    }

    pub fn delete(zone_id: impl Into<String>, record: Record) -> Self {
        Self {
            kind: TaskKind::Delete,
            zone_id: zone_id.into(),
            record,
        }
    }
}

/// Which of the two stores a connector plays in a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreRole {
    /// The DNS server holding the live record set (name/type/value/ttl owner).
    Authoritative,
    /// The spreadsheet holding comment/owner metadata and a mirrored ttl.
    Annotation,
}

impl fmt::Display for StoreRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Authoritative => "authoritative",
            Self::Annotation => "annotation",
        })
    }
}

/// Result of a task the remote store answered.
///
/// Transport failures are not represented here; they surface as
/// [`ConnectorError`](crate::ConnectorError).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApplyOutcome {
    Applied,
    Rejected { detail: String },
}

impl ApplyOutcome {
    pub fn rejected(detail: impl Into<String>) -> Self {
        Self::Rejected {
            detail: detail.into(),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
