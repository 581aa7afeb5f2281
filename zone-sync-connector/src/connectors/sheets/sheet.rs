//! Worksheet layout: zone titles, header columns and row <-> record mapping.

use serde_json::Value;

use crate::error::{ConnectorError, Result};
use crate::types::{Comment, Record, normalize_zone_id};

use super::CONNECTOR_NAME;

/// Header names, matched case-insensitively.
const COL_TYPE: &str = "type";
const COL_RECORD: &str = "record";
const COL_VALUE: &str = "value";
const COL_TTL: &str = "ttl";
const COL_COMMENT: &str = "comment";
const COL_OWNER: &str = "owner";

/// Zone id for a worksheet title, or `None` when the sheet is not a zone sheet.
///
/// `"D: example.com"` with prefix `"D:"` becomes `"example.com."`.
pub(crate) fn zone_id_from_title(title: &str, prefix: &str) -> Option<String> {
    let rest = title.strip_prefix(prefix)?.trim_start_matches(' ');
    if rest.trim().is_empty() {
        None
    } else {
        Some(normalize_zone_id(rest))
    }
}

/// Quote a worksheet title for use in an A1 range (`'D: example.com'`).
pub(crate) fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Column letters for a zero-based index: 0 -> `A`, 25 -> `Z`, 26 -> `AA`.
pub(crate) fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        // rem < 26
        letters.push(char::from(b'A' + u8::try_from(rem).unwrap_or(0)));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Render a cell of a values response as text.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Positions of the record columns, read from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SheetLayout {
    record_type: usize,
    name: usize,
    value: usize,
    ttl: usize,
    comment: usize,
    owner: usize,
    /// Number of columns a full row spans.
    pub width: usize,
}

impl SheetLayout {
    pub fn from_header(header: &[String], title: &str) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| ConnectorError::ParseError {
                    connector: CONNECTOR_NAME.to_string(),
                    detail: format!("Worksheet '{title}' has no '{name}' column"),
                })
        };

        let layout = Self {
            record_type: find(COL_TYPE)?,
            name: find(COL_RECORD)?,
            value: find(COL_VALUE)?,
            ttl: find(COL_TTL)?,
            comment: find(COL_COMMENT)?,
            owner: find(COL_OWNER)?,
            width: header.len(),
        };
        Ok(layout)
    }

    /// Record held by a row, or `None` for rows without a type.
    pub fn row_to_record(&self, row: &[String]) -> Option<Record> {
        let cell = |i: usize| row.get(i).map_or("", |s| s.trim());
        let record_type = cell(self.record_type);
        if record_type.is_empty() {
            return None;
        }
        Some(
            Record::new(cell(self.name), record_type, cell(self.value), cell(self.ttl))
                .with_comment(Comment::new(cell(self.comment), cell(self.owner))),
        )
    }

    /// Full row for `record`, starting from `existing` so unrelated columns are kept.
    pub fn record_to_row(&self, record: &Record, existing: &[String]) -> Vec<String> {
        let mut row: Vec<String> = existing.to_vec();
        row.resize(self.width.max(existing.len()), String::new());
        row[self.record_type] = record.record_type.clone();
        row[self.name] = record.name.clone();
        row[self.value] = record.value.clone();
        row[self.ttl] = record.ttl.clone();
        row[self.comment] = record.comment.content.clone();
        row[self.owner] = record.comment.account.clone();
        row
    }

    fn matches(&self, row: &[String], record: &Record) -> bool {
        let cell = |i: usize| row.get(i).map_or("", |s| s.trim());
        cell(self.name) == record.name
            && cell(self.record_type) == record.record_type
            && cell(self.value) == record.value
    }
}

/// Cell contents of one worksheet.
#[derive(Debug, Clone)]
pub(crate) struct Worksheet {
    pub title: String,
    pub layout: SheetLayout,
    /// Every row including the header, as text.
    pub rows: Vec<Vec<String>>,
    /// Index of the first record row.
    pub first_data_row: usize,
}

impl Worksheet {
    pub fn from_values(title: &str, values: &[Vec<Value>], skip_rows: usize) -> Result<Self> {
        let rows: Vec<Vec<String>> = values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        let header = rows.first().ok_or_else(|| ConnectorError::ParseError {
            connector: CONNECTOR_NAME.to_string(),
            detail: format!("Worksheet '{title}' has no header row"),
        })?;
        let layout = SheetLayout::from_header(header, title)?;

        Ok(Self {
            title: title.to_string(),
            layout,
            rows,
            first_data_row: 1 + skip_rows,
        })
    }

    /// Records in row order, skipping rows without a type.
    pub fn records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .skip(self.first_data_row)
            .filter_map(|row| self.layout.row_to_record(row))
            .collect()
    }

    /// Zero-based index of the first row holding `record`'s identity triple.
    pub fn find_row(&self, record: &Record) -> Option<usize> {
        self.rows
            .iter()
            .enumerate()
            .skip(self.first_data_row)
            .find(|(_, row)| self.layout.matches(row, record))
            .map(|(i, _)| i)
    }

    /// A1 range covering one full row (`'D: example.com'!A5:F5`).
    pub fn row_range(&self, index: usize, width: usize) -> String {
        let row_number = index + 1;
        format!(
            "{}!A{row_number}:{}{row_number}",
            quote_title(&self.title),
            column_letter(width.saturating_sub(1))
        )
    }
}
