//! Scanned rows and projected records

use std::collections::HashMap;

/// One storage row as yielded by a scan cursor
///
/// Cells are addressed by column family and qualifier. Only the latest
/// version inside the scan's time range is kept per cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    key: Vec<u8>,
    families: HashMap<Vec<u8>, HashMap<Vec<u8>, Vec<u8>>>,
}

impl RawRow {
    /// Create an empty row with the given row key
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            families: HashMap::new(),
        }
    }

    /// Builder-style cell insertion
    pub fn with_cell(
        mut self,
        family: impl Into<Vec<u8>>,
        qualifier: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        self.put(family, qualifier, value);
        self
    }

    /// Insert or replace a cell
    pub fn put(
        &mut self,
        family: impl Into<Vec<u8>>,
        qualifier: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) {
        self.families
            .entry(family.into())
            .or_default()
            .insert(qualifier.into(), value.into());
    }

    /// Row key
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Raw value of `family:qualifier`, if stored
    pub fn value(&self, family: &str, qualifier: &str) -> Option<&[u8]> {
        self.families
            .get(family.as_bytes())
            .and_then(|cells| cells.get(qualifier.as_bytes()))
            .map(Vec::as_slice)
    }

    /// Total number of stored cells across all families
    pub fn cell_count(&self) -> usize {
        self.families.values().map(HashMap::len).sum()
    }

    /// Absorb the cells of another chunk of the same row
    pub fn merge(&mut self, other: RawRow) {
        for (family, cells) in other.families {
            self.families.entry(family).or_default().extend(cells);
        }
    }
}

/// One output line: decoded values in column order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record(Vec<String>);

impl Record {
    /// Create a record with room for `capacity` fields
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, field: String) {
        self.0.push(field);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Record {
    fn from(fields: Vec<String>) -> Self {
        Self(fields)
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
