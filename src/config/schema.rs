//! Configuration schema types
//!
//! Key names follow the established `config.yml` layout: kebab-case keys inside
//! `connection-settings`, snake_case names for the two column maps.

use crate::config::columns::ColumnMap;
use crate::domain::{ColumnSpec, ColumnType, TimeRange};
use serde::{Deserialize, Serialize};

/// Main hbackup configuration
///
/// Constructed once at startup and passed by reference afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Gateway address, table and time range
    #[serde(rename = "connection-settings")]
    pub connection: ConnectionSettings,

    /// Column name to declared type; order fixes the record field order
    #[serde(rename = "column_type_map")]
    pub column_types: ColumnMap<ColumnType>,

    /// Column name to display label; value order fixes the CSV header order
    #[serde(rename = "column_desc_map", default)]
    pub column_labels: ColumnMap<String>,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BackupConfig {
    /// Validates the configuration
    ///
    /// An inverted time range is accepted; it exports zero rows.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.connection.validate()?;
        if self.column_types.is_empty() {
            return Err("column_type_map must declare at least one column".to_string());
        }
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Exported columns in `column_type_map` order
    ///
    /// Each column is labelled from `column_desc_map`, falling back to its
    /// name when no label is declared.
    pub fn columns(&self) -> Vec<ColumnSpec> {
        self.column_types
            .iter()
            .map(|(name, column_type)| {
                let spec = ColumnSpec::new(name, column_type.clone());
                match self.column_labels.get(name) {
                    Some(label) => spec.with_label(label.clone()),
                    None => spec,
                }
            })
            .collect()
    }

    /// CSV header labels in `column_desc_map` order
    ///
    /// Deliberately independent of [`BackupConfig::columns`].
    pub fn header_labels(&self) -> Vec<String> {
        self.column_labels.values().cloned().collect()
    }

    /// Scan time range
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.connection.start_ts, self.connection.end_ts)
    }

    /// Human readable differences between the two column maps
    ///
    /// Empty when both maps name the same columns in the same order.
    pub fn label_mismatches(&self) -> Vec<String> {
        let mut mismatches = Vec::new();

        for name in self.column_types.names() {
            if !self.column_labels.contains(name) {
                mismatches.push(format!("column '{name}' has no entry in column_desc_map"));
            }
        }
        for name in self.column_labels.names() {
            if !self.column_types.contains(name) {
                mismatches.push(format!("label for '{name}' has no entry in column_type_map"));
            }
        }

        if mismatches.is_empty() && !self.column_types.names().eq(self.column_labels.names()) {
            mismatches.push(
                "column_desc_map declares columns in a different order than column_type_map"
                    .to_string(),
            );
        }

        mismatches
    }

    /// Column types that will be decoded as text because they are unknown
    pub fn unrecognized_types(&self) -> Vec<(&str, &ColumnType)> {
        self.column_types
            .iter()
            .filter(|(_, column_type)| !column_type.is_recognized())
            .collect()
    }
}

/// Storage gateway connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConnectionSettings {
    /// REST gateway host
    #[serde(alias = "zk-host")]
    pub host: String,

    /// REST gateway port
    #[serde(alias = "zk-port")]
    pub port: u16,

    /// URL scheme (http or https)
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Table to back up
    #[serde(rename = "backup-table-name")]
    pub table_name: String,

    /// Column family holding the exported qualifiers
    #[serde(default = "default_column_family")]
    pub column_family: String,

    /// Inclusive lower bound of cell timestamps
    #[serde(rename = "start-ts")]
    pub start_ts: i64,

    /// Exclusive upper bound of cell timestamps
    #[serde(rename = "end-ts")]
    pub end_ts: i64,

    /// HTTP request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl ConnectionSettings {
    /// Base URL of the REST gateway
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("connection-settings.host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("connection-settings.port must be greater than 0".to_string());
        }
        if !matches!(self.scheme.as_str(), "http" | "https") {
            return Err(format!(
                "Invalid connection-settings.scheme '{}'. Must be one of: http, https",
                self.scheme
            ));
        }
        if self.table_name.trim().is_empty() {
            return Err("connection-settings.backup-table-name cannot be empty".to_string());
        }
        if self.column_family.trim().is_empty() {
            return Err("connection-settings.column-family cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("connection-settings.timeout-seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExportConfig {
    /// Records buffered before each flush to the output file
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Directory receiving `backup_<date>_<time>.csv`
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Cells fetched per scanner request
    #[serde(default = "default_scanner_batch")]
    pub scanner_batch: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            output_dir: default_output_dir(),
            scanner_batch: default_scanner_batch(),
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("export.batch-size must be greater than 0".to_string());
        }
        if self.scanner_batch == 0 {
            return Err("export.scanner-batch must be greater than 0".to_string());
        }
        if self.output_dir.trim().is_empty() {
            return Err("export.output-dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation (daily, hourly, never)
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log-level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local-rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local-path cannot be empty when file logging is enabled".to_string());
        }
        Ok(())
    }
}

// Default value functions
fn default_scheme() -> String {
    "http".to_string()
}

fn default_column_family() -> String {
    "DF".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_batch_size() -> usize {
    5000
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_scanner_batch() -> usize {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}
