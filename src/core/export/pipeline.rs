//! Export pipeline - drives one backup run
//!
//! Header first, then scan, project and append row by row, then close. The
//! cursor and the writer are both released on every path out of a run,
//! successful or not.

use super::batch::{BatchedWriter, FlushEvent};
use super::sink::CsvSink;
use super::summary::ExportSummary;
use crate::adapters::storage::{RowCursor, StorageClient};
use crate::config::BackupConfig;
use crate::core::transform::{ColumnCodec, RowProjector};
use crate::domain::{ColumnSpec, Result, TimeRange};
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

/// Everything one run needs to know, resolved from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub table_name: String,
    pub column_family: String,
    pub time_range: TimeRange,
    /// Output columns in value order
    pub columns: Vec<ColumnSpec>,
    /// Header line, in label-map order
    pub header: Vec<String>,
    pub batch_size: usize,
}

impl ExportRequest {
    pub fn from_config(config: &BackupConfig) -> Self {
        Self {
            table_name: config.connection.table_name.clone(),
            column_family: config.connection.column_family.clone(),
            time_range: config.time_range(),
            columns: config.columns(),
            header: config.header_labels(),
            batch_size: config.export.batch_size,
        }
    }
}

/// Storage-to-CSV export
pub struct ExportPipeline {
    client: Arc<dyn StorageClient>,
    codec: ColumnCodec,
}

impl ExportPipeline {
    /// Pipeline with the standard column codec
    pub fn new(client: Arc<dyn StorageClient>) -> Self {
        Self {
            client,
            codec: ColumnCodec::new(),
        }
    }

    /// Run one export into `sink`
    ///
    /// The header is written before the scan starts, so a failed run still
    /// leaves the header and every fully flushed batch behind.
    ///
    /// # Errors
    ///
    /// Returns the first storage, decode or sink error. Errors raised while
    /// releasing resources after a failure are logged and dropped.
    pub async fn run<W: Write + Send>(
        &self,
        request: &ExportRequest,
        sink: CsvSink<W>,
    ) -> Result<ExportSummary> {
        let start = Instant::now();

        tracing::info!(
            table = %request.table_name,
            family = %request.column_family,
            range = %request.time_range,
            destination = %sink.destination(),
            columns = request.columns.len(),
            "Starting export"
        );

        let mut writer = BatchedWriter::open(sink, &request.header, request.batch_size)?
            .with_progress(|event: &FlushEvent| {
                tracing::debug!(
                    records = event.records,
                    total = event.total_rows,
                    is_final = event.is_final,
                    "Batch flushed"
                );
            });

        let projector = RowProjector::new(&request.column_family, self.codec.clone());
        let scanned = !request.time_range.is_empty();
        let outcome = if scanned {
            self.copy_rows(request, &projector, &mut writer).await
        } else {
            tracing::info!(range = %request.time_range, "Time range is empty, skipping scan");
            Ok(())
        };

        let closed = writer.close();
        let stats = match (outcome, closed) {
            (Ok(()), closed) => closed?,
            (Err(e), Ok(stats)) => {
                tracing::error!(
                    error = %e,
                    rows_written = stats.rows_written,
                    output = %stats.destination,
                    "Export failed, output is partial"
                );
                return Err(e);
            }
            (Err(e), Err(close_err)) => {
                tracing::warn!(error = %close_err, "Failed to close output after error");
                return Err(e);
            }
        };

        let mut summary = ExportSummary::new(&request.table_name, request.time_range, stats.destination)
            .with_duration(start.elapsed());
        summary.row_count = stats.rows_written;
        summary.batches_flushed = stats.flushes;
        summary.scanned = scanned;
        Ok(summary)
    }

    async fn copy_rows<W: Write + Send>(
        &self,
        request: &ExportRequest,
        projector: &RowProjector,
        writer: &mut BatchedWriter<W>,
    ) -> Result<()> {
        let mut cursor = self
            .client
            .open_cursor(&request.table_name, &request.column_family, request.time_range)
            .await?;

        let copied = drain_cursor(cursor.as_mut(), projector, &request.columns, writer).await;

        if let Err(e) = cursor.close().await {
            if copied.is_ok() {
                tracing::warn!(error = %e, "Failed to release scan cursor");
            } else {
                tracing::debug!(error = %e, "Failed to release scan cursor after error");
            }
        }
        copied
    }
}

async fn drain_cursor<W: Write + Send>(
    cursor: &mut dyn RowCursor,
    projector: &RowProjector,
    columns: &[ColumnSpec],
    writer: &mut BatchedWriter<W>,
) -> Result<()> {
    while let Some(row) = cursor.next_row().await? {
        let record = projector.project(&row, columns)?;
        writer.append(record)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BackupError, ColumnType, StorageError};
    use async_trait::async_trait;

    /// Fails every scan; counts how often one was attempted
    struct UnreachableStore {
        attempts: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl StorageClient for UnreachableStore {
        async fn test_connection(&self) -> Result<()> {
            Err(StorageError::ConnectionFailed("unreachable".to_string()).into())
        }

        async fn open_cursor(
            &self,
            _table: &str,
            _family: &str,
            _range: TimeRange,
        ) -> Result<Box<dyn RowCursor>> {
            self.attempts
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Err(StorageError::ConnectionFailed("unreachable".to_string()).into())
        }
    }

    fn request(range: TimeRange) -> ExportRequest {
        ExportRequest {
            table_name: "events".to_string(),
            column_family: "DF".to_string(),
            time_range: range,
            columns: vec![ColumnSpec::new("id", ColumnType::String)],
            header: vec!["ID".to_string()],
            batch_size: 10,
        }
    }

    #[tokio::test]
    async fn test_empty_range_skips_scan() {
        let store = Arc::new(UnreachableStore {
            attempts: Default::default(),
        });
        let pipeline = ExportPipeline::new(store.clone());
        let mut out = Vec::new();

        let summary = pipeline
            .run(&request(TimeRange::new(50, 50)), CsvSink::new("mem", &mut out))
            .await
            .unwrap();

        assert_eq!(summary.row_count, 0);
        assert!(!summary.scanned);
        assert_eq!(store.attempts.load(std::sync::atomic::Ordering::SeqCst), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "ID\n");
    }

    #[tokio::test]
    async fn test_connection_failure_leaves_header_only() {
        let store = Arc::new(UnreachableStore {
            attempts: Default::default(),
        });
        let pipeline = ExportPipeline::new(store);
        let mut out = Vec::new();

        let err = pipeline
            .run(&request(TimeRange::new(0, 100)), CsvSink::new("mem", &mut out))
            .await
            .unwrap_err();

        assert!(matches!(err, BackupError::Storage(StorageError::ConnectionFailed(_))));
        assert_eq!(err.exit_code(), 4);
        assert_eq!(String::from_utf8(out).unwrap(), "ID\n");
    }
}
