// hbackup - HBase time-window CSV backup tool
// Copyright (c) 2025 hbackup Contributors
// Licensed under the MIT License

//! # hbackup - HBase table to CSV backup
//!
//! hbackup exports every row of one HBase table whose cells fall inside a
//! timestamp window into a single CSV file, decoding raw cell bytes by the
//! column types declared in the configuration.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Cell decoding, row projection and the export pipeline
//! - [`adapters`] - Storage seam and the HBase REST gateway client
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration loading and validation
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hbackup::adapters::hbase::HBaseRestClient;
//! use hbackup::config::{load_config, locate_config};
//! use hbackup::core::export::{CsvSink, ExportPipeline, ExportRequest};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config(locate_config(None)?)?;
//!     let client = HBaseRestClient::new(&config.connection, config.export.scanner_batch)?;
//!
//!     let sink = CsvSink::create_backup(
//!         Path::new(&config.export.output_dir),
//!         &chrono::Local::now(),
//!     )?;
//!     let summary = ExportPipeline::new(Arc::new(client))
//!         .run(&ExportRequest::from_config(&config), sink)
//!         .await?;
//!
//!     println!("{} rows written to {}", summary.row_count, summary.output_path);
//!     Ok(())
//! }
//! ```
//!
//! ## Decoding
//!
//! Cells are decoded by declared type: `long` as a big-endian `i64`,
//! `float`/`double` as big-endian IEEE-754, `string` as UTF-8. Absent cells
//! yield `0`, `0.0` or an empty field. The `logged_at` column is rendered
//! as a local `yyyy-MM-dd HH:mm:ss` timestamp.
//!
//! ```rust
//! use hbackup::core::transform::ColumnCodec;
//! use hbackup::domain::{ColumnSpec, ColumnType};
//!
//! let codec = ColumnCodec::new();
//! let amount = ColumnSpec::new("amount", ColumnType::Double);
//! assert_eq!(codec.decode(&amount, Some(&3.5f64.to_be_bytes())).unwrap(), "3.5");
//! assert_eq!(codec.decode(&amount, None).unwrap(), "0.0");
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`]; every
//! [`domain::BackupError`] maps to a process exit code.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
