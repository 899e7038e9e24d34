//! Export summary and reporting

use crate::domain::TimeRange;
use std::time::Duration;

/// Outcome of a completed export run
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// Table that was scanned
    pub table_name: String,

    /// Timestamp range that was requested
    pub time_range: TimeRange,

    /// Data records written, header excluded
    pub row_count: u64,

    /// Where the records were written
    pub output_path: String,

    /// Flushes performed, including the final one
    pub batches_flushed: usize,

    /// False when the scan was skipped because the range is empty
    pub scanned: bool,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a summary with zero rows
    pub fn new(
        table_name: impl Into<String>,
        time_range: TimeRange,
        output_path: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            time_range,
            row_count: 0,
            output_path: output_path.into(),
            batches_flushed: 0,
            scanned: false,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Rows per second over the whole run
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.row_count as f64 / secs
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            table = %self.table_name,
            range = %self.time_range,
            rows = self.row_count,
            output = %self.output_path,
            batches = self.batches_flushed,
            duration_secs = self.duration.as_secs(),
            rows_per_sec = format!("{:.1}", self.throughput()),
            "Export completed"
        );

        if !self.scanned {
            tracing::warn!(
                range = %self.time_range,
                "Time range is empty, no rows were scanned"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new("events", TimeRange::new(0, 10), "out.csv");

        assert_eq!(summary.table_name, "events");
        assert_eq!(summary.row_count, 0);
        assert_eq!(summary.output_path, "out.csv");
        assert_eq!(summary.batches_flushed, 0);
        assert!(!summary.scanned);
        assert_eq!(summary.duration, Duration::from_secs(0));
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new("events", TimeRange::new(0, 10), "out.csv")
            .with_duration(Duration::from_secs(120));

        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_throughput() {
        let mut summary = ExportSummary::new("events", TimeRange::new(0, 10), "out.csv");
        assert_eq!(summary.throughput(), 0.0);

        summary.row_count = 500;
        summary.duration = Duration::from_secs(2);
        assert_eq!(summary.throughput(), 250.0);
    }
}
