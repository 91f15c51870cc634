//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output
//! - JSON-formatted log files with rotation
//! - Configurable log levels
//!
//! # Example
//!
//! ```no_run
//! use logtrack::logging::init_logging;
//! use logtrack::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a weekly export
///
/// # Example
///
/// ```no_run
/// use logtrack::log_export_start;
/// use logtrack::domain::OwnerId;
///
/// let owner = OwnerId::new("u1").unwrap();
/// log_export_start!(&owner, "basic");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($owner:expr, $template:expr) => {
        tracing::info!(
            owner = %$owner,
            template = %$template,
            "Starting export"
        );
    };
}

/// Log the completion of a weekly export
///
/// # Example
///
/// ```no_run
/// use logtrack::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(4, Duration::from_secs(2));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($documents:expr, $duration:expr) => {
        tracing::info!(
            documents = $documents,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use logtrack::log_error_with_context;
/// use logtrack::domain::LogbookError;
///
/// let error = LogbookError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
