//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use hbackup::adapters::storage::{RowCursor, StorageClient};
use hbackup::domain::{RawRow, Result, StorageError, TimeRange};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// One stored cell version
#[derive(Debug, Clone)]
struct Cell {
    family: String,
    qualifier: String,
    timestamp: i64,
    value: Vec<u8>,
}

/// In-memory wide-column store with native range-scan semantics
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: HashMap<String, BTreeMap<Vec<u8>, Vec<Cell>>>,
    fail_after: Option<usize>,
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: &str) -> Self {
        self.tables.entry(table.to_string()).or_default();
        self
    }

    /// Store one cell version
    pub fn put(
        mut self,
        table: &str,
        row: &str,
        column: (&str, &str),
        timestamp: i64,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        self.tables
            .entry(table.to_string())
            .or_default()
            .entry(row.as_bytes().to_vec())
            .or_default()
            .push(Cell {
                family: column.0.to_string(),
                qualifier: column.1.to_string(),
                timestamp,
                value: value.into(),
            });
        self
    }

    /// Make every cursor fail after yielding `rows` rows
    pub fn failing_after(mut self, rows: usize) -> Self {
        self.fail_after = Some(rows);
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageClient for MemoryStore {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn open_cursor(
        &self,
        table: &str,
        family: &str,
        range: TimeRange,
    ) -> Result<Box<dyn RowCursor>> {
        let rows = self
            .tables
            .get(table)
            .ok_or_else(|| StorageError::TableNotFound(table.to_string()))?;
        self.opened.fetch_add(1, Ordering::SeqCst);

        let mut scanned = VecDeque::new();
        for (key, cells) in rows {
            let mut latest: HashMap<&str, &Cell> = HashMap::new();
            for cell in cells {
                let selected = cell.family == family && range.contains(cell.timestamp);
                if !selected {
                    continue;
                }
                let newer = latest
                    .get(cell.qualifier.as_str())
                    .map_or(true, |current| cell.timestamp > current.timestamp);
                if newer {
                    latest.insert(cell.qualifier.as_str(), cell);
                }
            }
            if latest.is_empty() {
                continue;
            }
            let mut row = RawRow::new(key.clone());
            for cell in latest.values() {
                row.put(cell.family.as_str(), cell.qualifier.as_str(), cell.value.clone());
            }
            scanned.push_back(row);
        }

        Ok(Box::new(MemoryCursor {
            rows: scanned,
            yielded: 0,
            fail_after: self.fail_after,
            closed: Arc::clone(&self.closed),
            is_closed: false,
        }))
    }
}

struct MemoryCursor {
    rows: VecDeque<RawRow>,
    yielded: usize,
    fail_after: Option<usize>,
    closed: Arc<AtomicUsize>,
    is_closed: bool,
}

#[async_trait]
impl RowCursor for MemoryCursor {
    async fn next_row(&mut self) -> Result<Option<RawRow>> {
        if self.fail_after == Some(self.yielded) {
            return Err(StorageError::ServerError {
                status: 500,
                message: "region server went away".to_string(),
            }
            .into());
        }
        self.yielded += 1;
        Ok(self.rows.pop_front())
    }

    async fn close(&mut self) -> Result<()> {
        if !self.is_closed {
            self.is_closed = true;
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

pub fn long(value: i64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

pub fn double(value: f64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Sample configuration with the given maps spliced in
pub fn config_yaml(start_ts: i64, end_ts: i64, types: &str, labels: &str, batch_size: usize) -> String {
    format!(
        r#"
connection-settings:
  host: localhost
  port: 8080
  backup-table-name: events
  start-ts: {start_ts}
  end-ts: {end_ts}
column_type_map:
{types}
column_desc_map:
{labels}
export:
  batch-size: {batch_size}
"#
    )
}
