//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Vitalex using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Vitalex - Civil Registration Export Tool
#[derive(Parser, Debug)]
#[command(name = "vitalex")]
#[command(version, about, long_about = None)]
#[command(author = "Vitalex Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "vitalex.toml", env = "VITALEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VITALEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export vital event records over a date range to CSV
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
