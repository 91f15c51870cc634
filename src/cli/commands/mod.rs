//! CLI command implementations
//!
//! This module contains all CLI command implementations and the helpers
//! they share for loading configuration and reporting failures.

pub mod backup;
pub mod export;
pub mod import;
pub mod init;
pub mod log;
pub mod status;
pub mod validate;

use crate::config::{load_config, LogtrackConfig};
use crate::domain::LogbookError;

/// Loads and validates the configuration, printing the failure
///
/// Returns the exit code to stop with when the file is unusable.
pub(crate) fn load_validated(config_path: &str) -> Result<LogtrackConfig, i32> {
    let config = load_config(config_path).map_err(|e| {
        println!("❌ Failed to load configuration file: {config_path}");
        println!("   Error: {e}");
        e.exit_code()
    })?;

    config.validate().map_err(|e| {
        tracing::error!(error = %e, "Configuration validation failed");
        println!("❌ Configuration validation failed");
        println!("   Error: {e}");
        2
    })?;

    Ok(config)
}

/// Prints a failed step and returns the exit code for the error
pub(crate) fn report_failure(action: &str, err: &LogbookError) -> i32 {
    crate::log_error_with_context!(err, action);
    println!("❌ {action} failed");
    println!("   Error: {err}");
    err.exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExportError;

    #[test]
    fn test_load_validated_missing_file() {
        let code = load_validated("/nonexistent/logtrack.toml").unwrap_err();
        assert_eq!(code, 2);
    }

    #[test]
    fn test_report_failure_exit_codes() {
        assert_eq!(
            report_failure("Export", &LogbookError::Export(ExportError::EmptyResult)),
            1
        );
        assert_eq!(
            report_failure("Import", &LogbookError::Validation("Invalid file format".into())),
            2
        );
        assert_eq!(report_failure("Backup", &LogbookError::Io("disk full".into())), 5);
    }
}
