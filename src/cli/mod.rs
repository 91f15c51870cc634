//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for logtrack using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// logtrack - Internship logbook with weekly document export
#[derive(Parser, Debug)]
#[command(name = "logtrack")]
#[command(version, about, long_about = None)]
#[command(author = "logtrack Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "logtrack.toml", env = "LOGTRACK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LOGTRACK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one document per week and package them into documents.zip
    Export(commands::export::ExportArgs),

    /// Add, edit, remove or list log entries
    #[command(subcommand)]
    Log(commands::log::LogCommand),

    /// Write all entries to a JSON backup file
    Backup(commands::backup::BackupArgs),

    /// Import entries from a JSON backup file
    Import(commands::import::ImportArgs),

    /// Show internship progress
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Whether the command needs a loaded configuration to set up logging
    pub fn uses_config(&self) -> bool {
        !matches!(self, Commands::Init(_) | Commands::ValidateConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::log::LogCommand;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["logtrack", "export"]);
        assert_eq!(cli.config, "logtrack.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["logtrack", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["logtrack", "--log-level", "debug", "status"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_export_flags() {
        let cli = Cli::parse_from([
            "logtrack",
            "export",
            "--exclude-mc",
            "--exclude-public-holidays",
            "--field",
            "student_id=CB21001",
            "--field",
            "student_name=Aina",
            "--dry-run",
        ]);
        let Commands::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert!(args.exclude_mc);
        assert!(args.exclude_public_holidays);
        assert!(!args.exclude_annual_leave);
        assert!(args.dry_run);
        assert_eq!(args.field.len(), 2);
        assert_eq!(args.field[0], ("student_id".to_string(), "CB21001".to_string()));
    }

    #[test]
    fn test_cli_rejects_malformed_field() {
        let result = Cli::try_parse_from(["logtrack", "export", "--field", "no-equals-sign"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_log_add() {
        let cli = Cli::parse_from([
            "logtrack",
            "log",
            "add",
            "--date",
            "2024-01-02",
            "--activity",
            "Set up the build server",
        ]);
        assert!(matches!(cli.command, Commands::Log(LogCommand::Add(_))));
        assert!(cli.command.uses_config());
    }

    #[test]
    fn test_cli_parse_log_remove() {
        let cli = Cli::parse_from(["logtrack", "log", "remove", "abc123"]);
        assert!(matches!(cli.command, Commands::Log(LogCommand::Remove(_))));
    }

    #[test]
    fn test_cli_parse_import() {
        let cli = Cli::parse_from(["logtrack", "import", "backup.json"]);
        assert!(matches!(cli.command, Commands::Import(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["logtrack", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
        assert!(!cli.command.uses_config());
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["logtrack", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
