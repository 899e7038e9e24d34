//! Export command implementation
//!
//! Backs up the configured table and time range into a timestamped CSV file.

use crate::adapters::hbase::HBaseRestClient;
use crate::config::BackupConfig;
use crate::core::export::{CsvSink, ExportPipeline, ExportRequest};
use crate::domain::Result;
use crate::{log_backup_complete, log_backup_start};
use chrono::Local;
use clap::Args;
use std::path::Path;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Override the output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Override the number of records per flush
    #[arg(long)]
    pub batch_size: Option<usize>,
}

impl ExportArgs {
    /// Execute the export command, returning the process exit code
    pub async fn execute(&self, mut config: BackupConfig) -> anyhow::Result<i32> {
        self.apply_overrides(&mut config);
        if let Err(e) = config.validate() {
            eprintln!("Invalid configuration: {e}");
            return Ok(2);
        }

        match run_backup(&config).await {
            Ok((rows, output)) => {
                println!("Backup completed: {rows} rows written to {output}");
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Backup failed");
                eprintln!("Backup failed: {e}");
                Ok(e.exit_code())
            }
        }
    }

    fn apply_overrides(&self, config: &mut BackupConfig) {
        if let Some(ref output_dir) = self.output_dir {
            config.export.output_dir = output_dir.clone();
        }
        if let Some(batch_size) = self.batch_size {
            config.export.batch_size = batch_size;
        }
    }
}

async fn run_backup(config: &BackupConfig) -> Result<(u64, String)> {
    let request = ExportRequest::from_config(config);
    log_backup_start!(request.table_name, request.time_range);

    let client = HBaseRestClient::new(&config.connection, config.export.scanner_batch)?;
    let sink = CsvSink::create_backup(Path::new(&config.export.output_dir), &Local::now())?;

    let summary = ExportPipeline::new(Arc::new(client)).run(&request, sink).await?;
    summary.log_summary();
    log_backup_complete!(summary.row_count, summary.output_path, summary.duration);

    Ok((summary.row_count, summary.output_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> BackupConfig {
        serde_yaml::from_str(
            r#"
connection-settings:
  host: localhost
  port: 8080
  backup-table-name: events
  start-ts: 0
  end-ts: 100
column_type_map:
  id: string
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = sample_config();
        let args = ExportArgs {
            output_dir: Some("/tmp/backups".to_string()),
            batch_size: Some(7),
        };
        args.apply_overrides(&mut config);
        assert_eq!(config.export.output_dir, "/tmp/backups");
        assert_eq!(config.export.batch_size, 7);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = sample_config();
        let before = config.export.batch_size;
        ExportArgs::default().apply_overrides(&mut config);
        assert_eq!(config.export.batch_size, before);
    }
}
