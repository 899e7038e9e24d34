//! Logging and observability
//!
//! Structured logging through `tracing`: console output plus an optional
//! rotated JSON log file.
//!
//! # Example
//!
//! ```no_run
//! use hbackup::logging::init_logging;
//! use hbackup::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{bootstrap_subscriber, init_logging, LoggingGuard, LOG_FILE_NAME};

/// Log the start of a backup run
///
/// # Example
///
/// ```no_run
/// use hbackup::log_backup_start;
/// use hbackup::domain::TimeRange;
///
/// log_backup_start!("events", TimeRange::new(0, 100));
/// ```
#[macro_export]
macro_rules! log_backup_start {
    ($table:expr, $range:expr) => {
        tracing::info!(
            table = %$table,
            range = %$range,
            "Starting backup"
        );
    };
}

/// Log the completion of a backup run
///
/// # Example
///
/// ```no_run
/// use hbackup::log_backup_complete;
/// use std::time::Duration;
///
/// log_backup_complete!(42u64, "backup.csv", Duration::from_secs(3));
/// ```
#[macro_export]
macro_rules! log_backup_complete {
    ($rows:expr, $output:expr, $duration:expr) => {
        tracing::info!(
            rows = $rows,
            output = %$output,
            duration_ms = $duration.as_millis(),
            "Backup completed"
        );
    };
}
