//! HBase REST gateway models
//!
//! Wire structures of the gateway's JSON representation. Row keys, column
//! names and cell values travel base64-encoded; these models handle the
//! encoding and convert to and from domain rows.

use crate::domain::{RawRow, StorageError, TimeRange};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// Scanner specification sent when opening a scan
///
/// The gateway treats `endTime` as exclusive, matching [`TimeRange`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerModel {
    /// Cells returned per fetch
    pub batch: usize,

    pub start_time: i64,

    pub end_time: i64,

    /// Base64-encoded column families or `family:qualifier` names; empty
    /// means every column
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column: Vec<String>,
}

impl ScannerModel {
    /// Scan every qualifier of `family` within `range`
    pub fn new(family: &str, range: TimeRange, batch: usize) -> Self {
        Self {
            batch,
            start_time: range.start_inclusive,
            end_time: range.end_exclusive,
            column: vec![encode(family.as_bytes())],
        }
    }
}

/// One fetch worth of rows
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CellSetModel {
    #[serde(rename = "Row", default)]
    pub rows: Vec<RowModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RowModel {
    /// Base64 row key
    pub key: String,

    #[serde(rename = "Cell", default)]
    pub cells: Vec<CellModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CellModel {
    /// Base64 `family:qualifier`
    pub column: String,

    #[serde(default)]
    pub timestamp: Option<i64>,

    /// Base64 value
    #[serde(rename = "$", default)]
    pub value: String,
}

impl RowModel {
    /// Decode into a domain row
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidResponse`] on malformed base64.
    pub fn into_raw_row(self) -> Result<RawRow, StorageError> {
        let mut row = RawRow::new(decode(&self.key, "row key")?);
        for cell in self.cells {
            let column = decode(&cell.column, "column")?;
            let (family, qualifier) = split_column(&column);
            row.put(family, qualifier, decode(&cell.value, "cell value")?);
        }
        Ok(row)
    }
}

/// Split `family:qualifier` at the first colon
///
/// Qualifiers may themselves contain colons; a name without one is a bare
/// family.
fn split_column(column: &[u8]) -> (&[u8], &[u8]) {
    match column.iter().position(|&b| b == b':') {
        Some(idx) => (&column[..idx], &column[idx + 1..]),
        None => (column, &[]),
    }
}

fn encode(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

fn decode(text: &str, what: &str) -> Result<Vec<u8>, StorageError> {
    general_purpose::STANDARD
        .decode(text)
        .map_err(|e| StorageError::InvalidResponse(format!("Invalid base64 {what}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b64(text: &str) -> String {
        encode(text.as_bytes())
    }

    #[test]
    fn test_scanner_model_serialization() {
        let model = ScannerModel::new("DF", TimeRange::new(100, 200), 500);
        let json = serde_json::to_value(&model).unwrap();

        assert_eq!(json["batch"], 500);
        assert_eq!(json["startTime"], 100);
        assert_eq!(json["endTime"], 200);
        assert_eq!(json["column"], serde_json::json!([b64("DF")]));
    }

    #[test]
    fn test_cell_set_deserialization() {
        let json = format!(
            r#"{{"Row":[{{"key":"{}","Cell":[
                {{"column":"{}","timestamp":150,"$":"{}"}},
                {{"column":"{}","$":"{}"}}
            ]}}]}}"#,
            b64("r1"),
            b64("DF:id"),
            b64("x1"),
            b64("DF:a:b"),
            b64("v"),
        );

        let cell_set: CellSetModel = serde_json::from_str(&json).unwrap();
        assert_eq!(cell_set.rows.len(), 1);
        assert_eq!(cell_set.rows[0].cells[0].timestamp, Some(150));

        let row = cell_set.rows.into_iter().next().unwrap().into_raw_row().unwrap();
        assert_eq!(row.key(), b"r1");
        assert_eq!(row.value("DF", "id"), Some(&b"x1"[..]));
        assert_eq!(row.value("DF", "a:b"), Some(&b"v"[..]));
    }

    #[test]
    fn test_empty_cell_set() {
        let cell_set: CellSetModel = serde_json::from_str("{}").unwrap();
        assert!(cell_set.rows.is_empty());
    }

    #[test]
    fn test_invalid_base64() {
        let row = RowModel {
            key: "!!not base64!!".to_string(),
            cells: Vec::new(),
        };
        assert!(matches!(
            row.into_raw_row(),
            Err(StorageError::InvalidResponse(msg)) if msg.contains("row key")
        ));
    }

    #[test]
    fn test_split_column() {
        assert_eq!(split_column(b"DF:id"), (&b"DF"[..], &b"id"[..]));
        assert_eq!(split_column(b"DF"), (&b"DF"[..], &b""[..]));
    }
}
