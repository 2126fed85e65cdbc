// Vantage - Storefront Analytics Export Tool
// Copyright (c) 2025 Vantage Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use vantage::cli::{Cli, Commands};
use vantage::config::load_logging_config;
use vantage::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging from the configuration's [logging] section; when
    // the config is missing or invalid this falls back to console-only and
    // the command reports the configuration problem itself
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = load_logging_config(&cli.config);
    let logging_guard = match init_logging(log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Vantage - Storefront Analytics Export Tool"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // Flush any buffered file logs; process::exit skips destructors
    drop(logging_guard);

    // Exit with appropriate code
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Sources(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute(&cli.config).await,
    }
}
