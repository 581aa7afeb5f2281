//! Google Sheets API type definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /spreadsheets/{id}?fields=sheets.properties(sheetId,title)`
#[derive(Debug, Deserialize)]
pub struct SpreadsheetInfo {
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
}

/// `GET /spreadsheets/{id}/values/{range}`; `values` is absent for an empty sheet
#[derive(Debug, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

/// Body of `values:append` and `values.update`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRangeBody {
    pub range: String,
    pub major_dimension: &'static str,
    pub values: Vec<Vec<String>>,
}

/// Body of `spreadsheets:batchUpdate` with a single row deletion
#[derive(Debug, Serialize)]
pub struct BatchUpdateBody {
    pub requests: Vec<BatchRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub delete_dimension: DeleteDimension,
}

#[derive(Debug, Serialize)]
pub struct DeleteDimension {
    pub range: DimensionRange,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i64,
    pub dimension: &'static str,
    pub start_index: usize,
    pub end_index: usize,
}

impl BatchUpdateBody {
    /// Delete one zero-based row
    pub fn delete_row(sheet_id: i64, index: usize) -> Self {
        Self {
            requests: vec![BatchRequest {
                delete_dimension: DeleteDimension {
                    range: DimensionRange {
                        sheet_id,
                        dimension: "ROWS",
                        start_index: index,
                        end_index: index + 1,
                    },
                },
            }],
        }
    }
}

/// Google API error envelope
#[derive(Debug, Deserialize)]
pub struct GoogleErrorBody {
    pub error: GoogleError,
}

#[derive(Debug, Deserialize)]
pub struct GoogleError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// OAuth token endpoint response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
}
