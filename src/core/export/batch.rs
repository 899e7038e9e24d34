//! Batched CSV writing
//!
//! [`BatchedWriter`] owns the output sink for the whole run. Records are
//! buffered and written in batches of `batch_size`; every flush pushes the
//! batch through to the underlying writer before the next record is
//! accepted, so memory stays bounded and flushed batches are on disk.
//!
//! Lifecycle: `open` writes the header, `append` accumulates and flushes at
//! the threshold, `close` flushes the remainder (possibly nothing) and
//! releases the sink. `close` consumes the writer, so it runs at most once.

use super::sink::CsvSink;
use crate::domain::{BackupError, Record, Result};
use std::fmt;
use std::io::Write;

/// Records per flush unless configured otherwise
pub const DEFAULT_BATCH_SIZE: usize = 5000;

/// Emitted after every flush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushEvent {
    /// Records written by this flush
    pub records: usize,
    /// Records written since `open`, header excluded
    pub total_rows: u64,
    /// True for the flush performed by `close`
    pub is_final: bool,
}

/// Observer invoked after each flush
pub type ProgressCallback = Box<dyn FnMut(&FlushEvent) + Send>;

/// Totals reported by [`BatchedWriter::close`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterStats {
    pub destination: String,
    pub rows_written: u64,
    /// Flushes including the final one
    pub flushes: usize,
}

/// Buffered, batch-flushing CSV writer
pub struct BatchedWriter<W: Write> {
    writer: csv::Writer<W>,
    destination: String,
    buffer: Vec<Record>,
    batch_size: usize,
    total_rows: u64,
    flushes: usize,
    on_flush: Option<ProgressCallback>,
}

impl<W: Write> BatchedWriter<W> {
    /// Take ownership of `sink` and write the header record immediately
    ///
    /// A `batch_size` of zero is treated as one.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::SinkWrite`] if the header cannot be written.
    pub fn open(sink: CsvSink<W>, header: &[String], batch_size: usize) -> Result<Self> {
        let (destination, inner) = sink.into_parts();
        // Header and records may legitimately differ in width.
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b',')
            .flexible(true)
            .from_writer(inner);

        writer.write_record(header)?;
        writer.flush().map_err(sink_error)?;

        tracing::debug!(
            destination = %destination,
            header_fields = header.len(),
            batch_size,
            "CSV header written"
        );

        let batch_size = batch_size.max(1);
        Ok(Self {
            writer,
            destination,
            buffer: Vec::with_capacity(batch_size),
            batch_size,
            total_rows: 0,
            flushes: 0,
            on_flush: None,
        })
    }

    /// Register a flush observer
    pub fn with_progress(mut self, callback: impl FnMut(&FlushEvent) + Send + 'static) -> Self {
        self.on_flush = Some(Box::new(callback));
        self
    }

    /// Buffer one record, flushing when the batch is full
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::SinkWrite`] if the triggered flush fails. The
    /// batch being flushed is discarded.
    pub fn append(&mut self, record: Record) -> Result<()> {
        self.buffer.push(record);
        if self.buffer.len() >= self.batch_size {
            self.flush_batch(false)?;
        }
        Ok(())
    }

    /// Records currently buffered
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Records flushed so far
    pub fn rows_written(&self) -> u64 {
        self.total_rows
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Flush the remaining records and release the sink
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::SinkWrite`] if the final flush fails. The
    /// sink is dropped either way.
    pub fn close(mut self) -> Result<WriterStats> {
        self.flush_batch(true)?;

        let Self {
            writer,
            destination,
            total_rows,
            flushes,
            ..
        } = self;

        writer
            .into_inner()
            .map_err(|e| BackupError::SinkWrite(e.error().to_string()))?;

        tracing::debug!(destination = %destination, rows = total_rows, "CSV sink closed");

        Ok(WriterStats {
            destination,
            rows_written: total_rows,
            flushes,
        })
    }

    fn flush_batch(&mut self, is_final: bool) -> Result<()> {
        let records = self.buffer.len();
        for record in self.buffer.drain(..) {
            self.writer.write_record(record.fields())?;
        }
        self.writer.flush().map_err(sink_error)?;

        self.total_rows += records as u64;
        self.flushes += 1;

        let event = FlushEvent {
            records,
            total_rows: self.total_rows,
            is_final,
        };
        if !is_final {
            tracing::info!(rows = self.total_rows, "{} rows backed up ...", self.total_rows);
        }
        if let Some(callback) = self.on_flush.as_mut() {
            callback(&event);
        }
        Ok(())
    }
}

impl<W: Write> fmt::Debug for BatchedWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchedWriter")
            .field("destination", &self.destination)
            .field("batch_size", &self.batch_size)
            .field("buffered", &self.buffer.len())
            .field("total_rows", &self.total_rows)
            .field("flushes", &self.flushes)
            .finish()
    }
}

fn sink_error(err: std::io::Error) -> BackupError {
    BackupError::SinkWrite(err.to_string())
}
