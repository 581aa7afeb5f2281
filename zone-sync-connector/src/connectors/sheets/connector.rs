//! Google Sheets `ZoneConnector` implementation

use async_trait::async_trait;
use reqwest::Method;

use crate::error::{ConnectorError, Result};
use crate::traits::{ErrorContext, ZoneConnector, into_outcome};
use crate::types::{ApplyOutcome, Record, Task, TaskKind, Zone};

use super::sheet::{Worksheet, quote_title, zone_id_from_title};
use super::types::{BatchUpdateBody, SheetProperties, SpreadsheetInfo, ValueRange, ValueRangeBody};
use super::{CONNECTOR_NAME, SheetsConnector};

impl SheetsConnector {
    /// Zone worksheets as `(zone_id, properties)`, in spreadsheet order.
    ///
    /// When two worksheets name the same zone only the first one is used.
    async fn zone_sheets(&self) -> Result<Vec<(String, SheetProperties)>> {
        let info: SpreadsheetInfo = self
            .get("?fields=sheets.properties", ErrorContext::default())
            .await?;

        let mut sheets: Vec<(String, SheetProperties)> = Vec::new();
        for entry in info.sheets {
            let props = entry.properties;
            let Some(zone_id) = zone_id_from_title(&props.title, &self.title_prefix) else {
                continue;
            };
            if sheets.iter().any(|(id, _)| *id == zone_id) {
                log::warn!(
                    "[{CONNECTOR_NAME}] Worksheet '{}' repeats zone {zone_id}, ignored",
                    props.title
                );
                continue;
            }
            sheets.push((zone_id, props));
        }
        Ok(sheets)
    }

    async fn find_sheet(&self, zone_id: &str) -> Result<SheetProperties> {
        self.zone_sheets()
            .await?
            .into_iter()
            .find(|(id, _)| id == zone_id)
            .map(|(_, props)| props)
            .ok_or_else(|| ConnectorError::ZoneNotFound {
                connector: CONNECTOR_NAME.to_string(),
                zone_id: zone_id.to_string(),
                raw_message: Some(format!("no worksheet titled '{} ...'", self.title_prefix)),
            })
    }

    async fn read_sheet(&self, props: &SheetProperties, zone_id: &str) -> Result<Worksheet> {
        let range = urlencoding::encode(&quote_title(&props.title)).into_owned();
        let values: ValueRange = self
            .get(&format!("/values/{range}"), ErrorContext::zone(zone_id))
            .await?;
        Worksheet::from_values(&props.title, &values.values, self.skip_rows)
    }

    async fn add_record(&self, zone_id: &str, record: &Record) -> Result<()> {
        let props = self.find_sheet(zone_id).await?;
        let sheet = self.read_sheet(&props, zone_id).await?;
        let range = quote_title(&sheet.title);
        let body = ValueRangeBody {
            range: range.clone(),
            major_dimension: "ROWS",
            values: vec![sheet.layout.record_to_row(record, &[])],
        };
        self.send(
            Method::POST,
            &format!(
                "/values/{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
                urlencoding::encode(&range)
            ),
            &body,
            ErrorContext::zone(zone_id),
        )
        .await
    }

    async fn update_record(&self, zone_id: &str, record: &Record) -> Result<()> {
        let props = self.find_sheet(zone_id).await?;
        let sheet = self.read_sheet(&props, zone_id).await?;
        let index = row_of(&sheet, zone_id, record)?;

        let row = sheet.layout.record_to_row(record, &sheet.rows[index]);
        let range = sheet.row_range(index, row.len());
        let body = ValueRangeBody {
            range: range.clone(),
            major_dimension: "ROWS",
            values: vec![row],
        };
        self.send(
            Method::PUT,
            &format!(
                "/values/{}?valueInputOption=RAW",
                urlencoding::encode(&range)
            ),
            &body,
            ErrorContext::zone(zone_id),
        )
        .await
    }

    async fn delete_record(&self, zone_id: &str, record: &Record) -> Result<()> {
        let props = self.find_sheet(zone_id).await?;
        let sheet = self.read_sheet(&props, zone_id).await?;
        let index = row_of(&sheet, zone_id, record)?;

        self.send(
            Method::POST,
            ":batchUpdate",
            &BatchUpdateBody::delete_row(props.sheet_id, index),
            ErrorContext::zone(zone_id),
        )
        .await
    }
}

/// Row index of `record`, or an `InvalidParameter` rejection when the sheet no longer holds it.
fn row_of(sheet: &Worksheet, zone_id: &str, record: &Record) -> Result<usize> {
    sheet
        .find_row(record)
        .ok_or_else(|| ConnectorError::InvalidParameter {
            connector: CONNECTOR_NAME.to_string(),
            param: "record".to_string(),
            detail: format!("{} {} not found in zone {zone_id}", record.label(), record.value),
        })
}

#[async_trait]
impl ZoneConnector for SheetsConnector {
    fn id(&self) -> &'static str {
        CONNECTOR_NAME
    }

    async fn fetch_zones(&self) -> Result<Vec<Zone>> {
        let sheets = self.zone_sheets().await?;
        log::debug!("[{CONNECTOR_NAME}] {} zone worksheet(s) listed", sheets.len());

        let mut zones = Vec::with_capacity(sheets.len());
        for (zone_id, props) in sheets {
            let sheet = self.read_sheet(&props, &zone_id).await?;
            let records = sheet.records();
            log::debug!(
                "[{CONNECTOR_NAME}] Zone {zone_id} loaded with {} record(s)",
                records.len()
            );
            zones.push(Zone::new(zone_id, records));
        }

        Ok(zones)
    }

    async fn apply_task(&self, task: &Task) -> Result<ApplyOutcome> {
        let result = match task.kind {
            TaskKind::Add => self.add_record(&task.zone_id, &task.record).await,
            TaskKind::Update => self.update_record(&task.zone_id, &task.record).await,
            TaskKind::Delete => self.delete_record(&task.zone_id, &task.record).await,
        };
        into_outcome(result)
    }
}
