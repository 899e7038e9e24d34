// hbackup - HBase time-window CSV backup tool
// Copyright (c) 2025 hbackup Contributors
// Licensed under the MIT License

use hbackup::cli::{Cli, Commands};
use hbackup::config::{load_config, locate_config, BackupConfig};
use hbackup::domain::Result;
use hbackup::logging::{bootstrap_subscriber, init_logging, LoggingGuard};
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Config lookup logs before the configured subscriber can exist
    let bootstrap_level = cli.log_level.as_deref().unwrap_or("info");
    let loaded = tracing::subscriber::with_default(
        bootstrap_subscriber(bootstrap_level, std::io::stderr),
        || load(&cli),
    );

    let (config, config_path) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    };

    let guard = match start_logging(&cli, &config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(e.exit_code());
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path,
        "hbackup - HBase to CSV backup"
    );
    for mismatch in config.label_mismatches() {
        tracing::warn!(%mismatch, "Header labels do not line up with exported columns");
    }

    let exit_code = match execute_command(&cli, config, &config_path).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    drop(guard);
    process::exit(exit_code);
}

fn load(cli: &Cli) -> Result<(BackupConfig, String)> {
    let path = locate_config(cli.config_file.as_deref())?;
    let config = load_config(&path)?;
    Ok((config, path.display().to_string()))
}

fn start_logging(cli: &Cli, config: &BackupConfig) -> Result<LoggingGuard> {
    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(config.logging.log_level.as_str());
    init_logging(log_level, &config.logging)
}

async fn execute_command(cli: &Cli, config: BackupConfig, config_path: &str) -> anyhow::Result<i32> {
    match cli.command() {
        Commands::Export(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(&config, config_path).await,
    }
}
