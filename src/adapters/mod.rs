//! External system integrations for hbackup.
//!
//! - [`storage`] - Storage abstraction the export pipeline depends on
//! - [`hbase`] - HBase implementation over the REST gateway
//!
//! # Design Pattern
//!
//! Adapters isolate the backing store behind the [`storage::StorageClient`]
//! and [`storage::RowCursor`] traits, so the pipeline can be exercised with
//! in-memory implementations.
//!
//! ```rust,no_run
//! use hbackup::adapters::hbase::HBaseRestClient;
//! use hbackup::adapters::storage::StorageClient;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HBaseRestClient::with_base_url("http://hbase-rest:8080", Duration::from_secs(30), 1000)?;
//! client.test_connection().await?;
//! # Ok(())
//! # }
//! ```

pub mod hbase;
pub mod storage;
