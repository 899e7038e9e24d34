//! Core export logic for hbackup.
//!
//! # Modules
//!
//! - [`transform`] - Decoding raw cells and projecting rows onto columns
//! - [`export`] - Batched CSV writing and the export pipeline
//!
//! # Export Workflow
//!
//! 1. **Header**: Write the configured labels to the output file
//! 2. **Scan**: Open a cursor over the table, restricted to the time range
//! 3. **Project**: Decode each row into one record in column order
//! 4. **Write**: Buffer records and flush them in batches
//! 5. **Close**: Flush the remainder and release cursor and file
//!
//! # Example
//!
//! ```rust,no_run
//! use hbackup::adapters::hbase::HBaseRestClient;
//! use hbackup::config::load_config;
//! use hbackup::core::export::{CsvSink, ExportPipeline, ExportRequest};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("config.yml")?;
//! let client = HBaseRestClient::new(&config.connection, config.export.scanner_batch)?;
//!
//! let sink = CsvSink::create_backup(Path::new(&config.export.output_dir), &chrono::Local::now())?;
//! let summary = ExportPipeline::new(Arc::new(client))
//!     .run(&ExportRequest::from_config(&config), sink)
//!     .await?;
//!
//! println!("{} rows written to {}", summary.row_count, summary.output_path);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod transform;
