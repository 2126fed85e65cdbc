//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Vantage using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Vantage - Storefront Analytics Export Tool
#[derive(Parser, Debug)]
#[command(name = "vantage")]
#[command(version, about, long_about = None)]
#[command(author = "Vantage Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "vantage.toml", env = "VANTAGE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VANTAGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an export: validate, gate, preview, and write the CSV
    Export(commands::export::ExportArgs),

    /// Validate configuration file and query templates
    ValidateConfig(commands::validate::ValidateArgs),

    /// List registered data sources and their template status
    Sources(commands::sources::SourcesArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
