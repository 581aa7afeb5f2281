//! PowerDNS `ZoneConnector` implementation

use async_trait::async_trait;

use crate::error::{ConnectorError, Result};
use crate::traits::{ErrorContext, ZoneConnector, into_outcome};
use crate::types::{ApplyOutcome, Comment, Record, Task, TaskKind, Zone, normalize_zone_id};

use super::types::{PdnsPatchBody, PdnsRrsetChange};
use super::{
    CONNECTOR_NAME, PdnsComment, PdnsRecord, PdnsRrset, PdnsZone, PdnsZoneSummary,
    PowerDnsConnector,
};

impl PowerDnsConnector {
    /// Flatten RRsets into one `Record` per record content.
    ///
    /// PowerDNS keeps comments per RRset; every record of the set gets the first one.
    pub(crate) fn rrsets_to_records(rrsets: Vec<PdnsRrset>) -> Vec<Record> {
        let mut records = Vec::new();
        for rrset in rrsets {
            let comment = rrset
                .comments
                .first()
                .map(|c| Comment::new(c.content.clone(), c.account.clone()))
                .unwrap_or_default();
            let ttl = rrset.ttl.to_string();
            for rec in rrset.records {
                records.push(
                    Record::new(&rrset.name, &rrset.record_type, rec.content, &ttl)
                        .with_comment(comment.clone()),
                );
            }
        }
        records
    }

    /// Build a `REPLACE` change for the RRset holding `record`.
    ///
    /// Every sibling content is kept so a multi-value RRset is never truncated;
    /// only ttl and comment change.
    pub(crate) fn replace_change(rrset: &PdnsRrset, record: &Record, ttl: u32) -> PdnsRrsetChange {
        let mut records = rrset.records.clone();
        if !records.iter().any(|r| r.content == record.value) {
            records.push(PdnsRecord {
                content: record.value.clone(),
                disabled: false,
            });
        }

        let comments = if record.comment.is_empty() {
            Vec::new()
        } else {
            vec![PdnsComment {
                content: record.comment.content.clone(),
                account: record.comment.account.clone(),
            }]
        };

        PdnsRrsetChange {
            name: rrset.name.clone(),
            record_type: rrset.record_type.clone(),
            ttl,
            changetype: "REPLACE",
            records,
            comments,
        }
    }

    async fn fetch_zone(&self, zone_id: &str) -> Result<PdnsZone> {
        self.get(&format!("/zones/{zone_id}"), ErrorContext::zone(zone_id))
            .await
    }

    async fn update_record(&self, zone_id: &str, record: &Record) -> Result<()> {
        let ttl: u32 = record
            .ttl
            .parse()
            .map_err(|_| ConnectorError::InvalidParameter {
                connector: CONNECTOR_NAME.to_string(),
                param: "ttl".to_string(),
                detail: format!("'{}' is not a valid TTL", record.ttl),
            })?;

        // Re-read the zone so sibling records of the RRset survive the REPLACE
        let zone = self.fetch_zone(zone_id).await?;
        let rrset = zone
            .rrsets
            .iter()
            .find(|r| r.name == record.name && r.record_type == record.record_type)
            .ok_or_else(|| ConnectorError::InvalidParameter {
                connector: CONNECTOR_NAME.to_string(),
                param: "record".to_string(),
                detail: format!("RRset {} not found in zone {zone_id}", record.label()),
            })?;

        let body = PdnsPatchBody {
            rrsets: vec![Self::replace_change(rrset, record, ttl)],
        };
        self.patch(&format!("/zones/{zone_id}"), &body, ErrorContext::zone(zone_id))
            .await
    }
}

#[async_trait]
impl ZoneConnector for PowerDnsConnector {
    fn id(&self) -> &'static str {
        CONNECTOR_NAME
    }

    async fn fetch_zones(&self) -> Result<Vec<Zone>> {
        let summaries: Vec<PdnsZoneSummary> =
            self.get("/zones", ErrorContext::default()).await?;
        log::debug!("[{CONNECTOR_NAME}] {} zone(s) listed", summaries.len());

        let mut zones = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let zone = self.fetch_zone(&summary.id).await?;
            let records = Self::rrsets_to_records(zone.rrsets);
            log::debug!(
                "[{CONNECTOR_NAME}] Zone {} loaded with {} record(s)",
                zone.name,
                records.len()
            );
            zones.push(Zone::new(normalize_zone_id(&zone.name), records));
        }

        Ok(zones)
    }

    async fn apply_task(&self, task: &Task) -> Result<ApplyOutcome> {
        match task.kind {
            TaskKind::Update => into_outcome(self.update_record(&task.zone_id, &task.record).await),
            // The live record set is never provisioned or depopulated from here
            TaskKind::Add | TaskKind::Delete => Ok(ApplyOutcome::rejected(
                ConnectorError::Unsupported {
                    connector: CONNECTOR_NAME.to_string(),
                    operation: task.kind.to_string(),
                }
                .to_string(),
            )),
        }
    }
}
