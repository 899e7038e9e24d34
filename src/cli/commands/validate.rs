//! Validate config command implementation
//!
//! Loads and validates the configuration, prints a summary and optionally
//! checks that the REST gateway is reachable.

use crate::adapters::hbase::HBaseRestClient;
use crate::adapters::storage::StorageClient;
use crate::config::BackupConfig;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Also check that the storage gateway is reachable
    #[arg(long)]
    pub check_connection: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command against an already loaded config
    pub async fn execute(&self, config: &BackupConfig, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Configuration file: {config_path}");
        println!("Configuration is valid");
        println!();
        print_summary(config);

        for mismatch in config.label_mismatches() {
            println!("  Warning: {mismatch}");
        }
        for (name, column_type) in config.unrecognized_types() {
            println!("  Warning: column '{name}' has unrecognized type '{column_type}', exported as text");
        }

        if self.check_connection {
            let client = HBaseRestClient::new(&config.connection, config.export.scanner_batch)?;
            match client.test_connection().await {
                Ok(()) => println!("Gateway {} is reachable", client.base_url()),
                Err(e) => {
                    println!("Gateway {} is not reachable: {e}", client.base_url());
                    return Ok(e.exit_code());
                }
            }
        }

        Ok(0)
    }
}

fn print_summary(config: &BackupConfig) {
    let range = config.time_range();
    println!("Configuration Summary:");
    println!("  Gateway: {}", config.connection.base_url());
    println!("  Table: {}", config.connection.table_name);
    println!("  Column Family: {}", config.connection.column_family);
    println!("  Time Range: {range}");
    if range.is_empty() {
        println!("  Warning: time range is empty, the backup will contain only the header");
    }
    println!("  Columns: {}", config.column_types.len());
    println!("  Header: {}", config.header_labels().join(", "));
    println!("  Batch Size: {}", config.export.batch_size);
    println!("  Output Directory: {}", config.export.output_dir);
    println!();
}
