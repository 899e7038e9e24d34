//! Configuration management for hbackup.
//!
//! # Overview
//!
//! hbackup reads a YAML (or TOML) configuration file with support for:
//! - Two lookup locations (`config.yml` in the working directory, then an explicit path)
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `HBACKUP_*` environment overrides
//! - Order-preserving column maps
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```yaml
//! connection-settings:
//!   host: hbase-rest.example.com
//!   port: 8080
//!   backup-table-name: events
//!   start-ts: 1700000000000
//!   end-ts: 1700086400000
//!
//! column_type_map:
//!   id: string
//!   amount: double
//!   logged_at: long
//!
//! column_desc_map:
//!   id: ID
//!   amount: Amount
//!   logged_at: Logged At
//!
//! export:
//!   batch-size: 5000
//!   output-dir: /var/backups
//! ```
//!
//! The key order of `column_type_map` decides the order of values in every
//! CSV record; the value order of `column_desc_map` decides the header line.
//! The two are read independently.

pub mod columns;
pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use columns::ColumnMap;
pub use loader::{load_config, locate_config, DEFAULT_CONFIG_FILE};
pub use schema::{BackupConfig, ConnectionSettings, ExportConfig, LoggingConfig};
