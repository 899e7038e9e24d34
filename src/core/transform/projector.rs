//! Row projection
//!
//! Turns a scanned row into a flat [`Record`] holding one decoded value per
//! configured column.

use super::codec::ColumnCodec;
use crate::domain::{ColumnSpec, DecodeError, RawRow, Record};

/// Projects rows of one column family onto an ordered column list
#[derive(Debug, Clone)]
pub struct RowProjector {
    family: String,
    codec: ColumnCodec,
}

impl RowProjector {
    pub fn new(family: impl Into<String>, codec: ColumnCodec) -> Self {
        Self {
            family: family.into(),
            codec,
        }
    }

    /// Build the record for `row`
    ///
    /// The record has exactly `columns.len()` fields in `columns` order,
    /// whatever the row actually stores.
    pub fn project(&self, row: &RawRow, columns: &[ColumnSpec]) -> Result<Record, DecodeError> {
        let mut record = Record::with_capacity(columns.len());
        for column in columns {
            let raw = row.value(&self.family, &column.name);
            record.push(self.codec.decode(column, raw)?);
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ColumnType;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("id", ColumnType::String),
            ColumnSpec::new("amount", ColumnType::Double),
            ColumnSpec::new("count", ColumnType::Long),
        ]
    }

    #[test]
    fn test_project_in_column_order() {
        let projector = RowProjector::new("DF", ColumnCodec::new());
        let row = RawRow::new("r1")
            .with_cell("DF", "count", 3i64.to_be_bytes())
            .with_cell("DF", "id", "x1")
            .with_cell("DF", "amount", 2.5f64.to_be_bytes());

        let record = projector.project(&row, &columns()).unwrap();
        assert_eq!(record.fields(), ["x1", "2.5", "3"]);
    }

    #[test]
    fn test_empty_row_yields_defaults() {
        let projector = RowProjector::new("DF", ColumnCodec::new());
        let record = projector.project(&RawRow::new("r1"), &columns()).unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.fields(), ["", "0.0", "0"]);
    }

    #[test]
    fn test_extra_stored_columns_are_ignored() {
        let projector = RowProjector::new("DF", ColumnCodec::new());
        let mut row = RawRow::new("r1");
        for i in 0..50 {
            row.put("DF", format!("unused_{i}"), "v");
        }
        row.put("DF", "id", "kept");

        let record = projector.project(&row, &columns()).unwrap();
        assert_eq!(record.len(), columns().len());
        assert_eq!(record.fields()[0], "kept");
    }

    #[test]
    fn test_other_family_is_not_read() {
        let projector = RowProjector::new("DF", ColumnCodec::new());
        let row = RawRow::new("r1").with_cell("META", "id", "hidden");
        let record = projector.project(&row, &columns()).unwrap();
        assert_eq!(record.fields()[0], "");
    }

    #[test]
    fn test_empty_column_list() {
        let projector = RowProjector::new("DF", ColumnCodec::new());
        let row = RawRow::new("r1").with_cell("DF", "id", "x1");
        assert!(projector.project(&row, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_decode_failure_propagates() {
        let projector = RowProjector::new("DF", ColumnCodec::new());
        let row = RawRow::new("r1").with_cell("DF", "amount", vec![1u8, 2, 3]);
        let err = projector.project(&row, &columns()).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidLength { expected: 8, actual: 3, .. }));
    }
}
