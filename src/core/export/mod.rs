//! Export orchestration and batch writing
//!
//! - [`sink`] - output destinations and backup file naming
//! - [`batch`] - buffered, batch-flushing CSV writer
//! - [`pipeline`] - scan, project and write one backup
//! - [`summary`] - run summary and reporting

pub mod batch;
pub mod pipeline;
pub mod sink;
pub mod summary;

pub use batch::{BatchedWriter, FlushEvent, ProgressCallback, WriterStats, DEFAULT_BATCH_SIZE};
pub use pipeline::{ExportPipeline, ExportRequest};
pub use sink::{backup_file_name, backup_path, CsvSink};
pub use summary::ExportSummary;
