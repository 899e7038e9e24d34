//! Domain models and types for hbackup.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Column descriptions** ([`ColumnSpec`], [`ColumnType`])
//! - **Scan data** ([`RawRow`], [`Record`], [`TimeRange`])
//! - **Error types** ([`BackupError`], [`StorageError`], [`DecodeError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, BackupError>`]:
//!
//! ```rust,no_run
//! use hbackup::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = hbackup::config::load_config("config.yml")?;
//!     println!("Exporting {}", config.connection.table_name);
//!     Ok(())
//! }
//! ```

pub mod column;
pub mod errors;
pub mod range;
pub mod result;
pub mod row;

// Re-export commonly used types for convenience
pub use column::{ColumnSpec, ColumnType};
pub use errors::{BackupError, DecodeError, StorageError};
pub use range::TimeRange;
pub use result::Result;
pub use row::{RawRow, Record};
