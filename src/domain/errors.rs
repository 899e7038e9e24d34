//! Domain error types
//!
//! This module defines the error hierarchy for hbackup. Every failure kind is
//! fatal for a run: nothing in the export path retries or recovers locally.
//! Third-party error types are converted to strings at the boundary.

use thiserror::Error;

/// Main hbackup error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum BackupError {
    /// No configuration file could be located
    #[error("Configuration not found: {0}")]
    ConfigMissing(String),

    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Storage cluster errors (connection, scanner, response decoding)
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A present column value could not be decoded under its declared type
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The output sink rejected a write
    #[error("Sink write error: {0}")]
    SinkWrite(String),

    /// I/O errors outside the sink (creating the output file, log directory)
    #[error("I/O error: {0}")]
    Io(String),
}

impl BackupError {
    /// Process exit status for this error
    ///
    /// Configuration problems exit with 2, storage failures with 4 and
    /// everything else with 5.
    pub fn exit_code(&self) -> i32 {
        match self {
            BackupError::ConfigMissing(_) | BackupError::Configuration(_) => 2,
            BackupError::Storage(_) => 4,
            BackupError::Decode(_) | BackupError::SinkWrite(_) | BackupError::Io(_) => 5,
        }
    }
}

/// Storage-specific errors
///
/// Errors that occur when talking to the HBase REST gateway.
/// These errors don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to reach the gateway
    #[error("Failed to connect to storage gateway: {0}")]
    ConnectionFailed(String),

    /// Table does not exist
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Scanner could not be created
    #[error("Failed to open scanner: {0}")]
    ScannerFailed(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Response body could not be interpreted
    #[error("Invalid response from gateway: {0}")]
    InvalidResponse(String),
}

/// Column decoding errors
///
/// Only present-but-malformed values produce these; absent values always
/// decode to the type's default text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Raw value has the wrong width for a fixed-size numeric type
    #[error("column '{column}': expected {expected} bytes for {type_name}, got {actual}")]
    InvalidLength {
        column: String,
        type_name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Timestamp cannot be represented in the local time zone
    #[error("column '{column}': timestamp {value} is out of range")]
    TimestampOutOfRange { column: String, value: i64 },
}

// Conversion from std::io::Error
impl From<std::io::Error> for BackupError {
    fn from(err: std::io::Error) -> Self {
        BackupError::Io(err.to_string())
    }
}

// Conversion from csv errors raised while writing records
impl From<csv::Error> for BackupError {
    fn from(err: csv::Error) -> Self {
        BackupError::SinkWrite(err.to_string())
    }
}

// Conversion from serde_yaml parse errors
impl From<serde_yaml::Error> for BackupError {
    fn from(err: serde_yaml::Error) -> Self {
        BackupError::Configuration(format!("YAML parse error: {err}"))
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for BackupError {
    fn from(err: toml::de::Error) -> Self {
        BackupError::Configuration(format!("TOML parse error: {err}"))
    }
}
