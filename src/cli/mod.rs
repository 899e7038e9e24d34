//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for hbackup using clap.
//! Running `hbackup` without a subcommand performs a backup.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hbackup - export a time window of an HBase table to CSV
#[derive(Parser, Debug)]
#[command(name = "hbackup")]
#[command(version, about, long_about = None)]
#[command(author = "hbackup Contributors")]
pub struct Cli {
    /// Configuration file used when ./config.yml does not exist
    #[arg(short = 'c', long, env = "HBACKUP_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HBACKUP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to `export`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The command to run, `export` when none was given
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Export(commands::export::ExportArgs::default()))
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Back up the configured table and time range to CSV
    Export(commands::export::ExportArgs),

    /// Validate the configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}
