//! Output destinations
//!
//! A [`CsvSink`] pairs a writer with the identifier reported in the export
//! summary. Backups land in `backup_<YYYYMMDD>_<HHMMSS>.csv`, stamped with
//! the local start time of the run.

use crate::domain::{BackupError, Result};
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Byte destination for CSV output
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    destination: String,
    inner: W,
}

impl<W: Write> CsvSink<W> {
    /// Wrap an arbitrary writer
    pub fn new(destination: impl Into<String>, inner: W) -> Self {
        Self {
            destination: destination.into(),
            inner,
        }
    }

    /// Identifier of the destination (the file path for file sinks)
    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn into_parts(self) -> (String, W) {
        (self.destination, self.inner)
    }
}

impl CsvSink<File> {
    /// Create (or truncate) the file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| {
            BackupError::Io(format!("Failed to create {}: {}", path.display(), e))
        })?;
        Ok(Self::new(path.display().to_string(), file))
    }

    /// Create a timestamped backup file inside `output_dir`
    pub fn create_backup(output_dir: &Path, now: &DateTime<Local>) -> Result<Self> {
        fs::create_dir_all(output_dir).map_err(|e| {
            BackupError::Io(format!(
                "Failed to create output directory {}: {}",
                output_dir.display(),
                e
            ))
        })?;
        Self::create(&backup_path(output_dir, now))
    }
}

/// `backup_<YYYYMMDD>_<HHMMSS>.csv`
pub fn backup_file_name(now: &DateTime<Local>) -> String {
    format!("backup_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

pub fn backup_path(output_dir: &Path, now: &DateTime<Local>) -> PathBuf {
    output_dir.join(backup_file_name(now))
}
