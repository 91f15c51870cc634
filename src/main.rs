// logtrack - Internship logbook with weekly document export
// Copyright (c) 2025 logtrack Contributors
// Licensed under the MIT License

use clap::Parser;
use logtrack::cli::{Cli, Commands};
use logtrack::config::{load_config, LoggingConfig};
use logtrack::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging follows the [logging] section when the configuration is
    // readable; commands that inspect or create it log to the console only
    let loaded = if cli.command.uses_config() {
        load_config(&cli.config).ok()
    } else {
        None
    };
    let (configured_level, logging_config) = match loaded {
        Some(config) => (Some(config.application.log_level), config.logging),
        None => (None, console_only()),
    };
    let log_level = cli
        .log_level
        .clone()
        .or(configured_level)
        .unwrap_or_else(|| "info".to_string());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "logtrack - Internship logbook"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors, so flush the file writer first
    drop(guard);
    process::exit(exit_code);
}

fn console_only() -> LoggingConfig {
    LoggingConfig {
        local_enabled: false,
        ..LoggingConfig::default()
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::Log(command) => command.execute(&cli.config).await,
        Commands::Backup(args) => args.execute(&cli.config).await,
        Commands::Import(args) => args.execute(&cli.config).await,
        Commands::Status(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
