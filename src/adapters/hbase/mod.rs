//! HBase adapter over the REST gateway
//!
//! - [`client`] - scanner lifecycle and row assembly
//! - [`models`] - JSON wire models

pub mod client;
pub mod models;

pub use client::{HBaseRestClient, HBaseScanner};
pub use models::{CellModel, CellSetModel, RowModel, ScannerModel};
