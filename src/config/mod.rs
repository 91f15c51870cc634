//! Configuration management for logtrack.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! logtrack uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `LOGTRACK_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use logtrack::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("logtrack.toml")?;
//!
//! println!("Owner: {}", config.user.id);
//! println!("Period: {}", config.user.date_range());
//! println!("Template: {}", config.export.template);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run switch
//! - [`UserConfig`] - Owner id, weekend system, internship period
//! - [`StoreConfig`] - Location of the log store
//! - [`ExportConfig`] - Template, output directory, exclusions, document fields
//! - [`LoggingConfig`] - File logging
//!
//! # Example Configuration
//!
//! ```toml
//! [user]
//! id = "u1"
//! weekend_system = "saturday-sunday"
//! start_date = "2024-01-01"
//! end_date = "2024-06-30"
//!
//! [export]
//! template = "basic"
//! output_dir = "output"
//!
//! [export.exclusions]
//! exclude_public_holidays = true
//!
//! [export.fields]
//! student_id = "${STUDENT_ID}"
//! student_name = "Aina"
//! industry_name = "Acme Sdn Bhd"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ExportConfig, LoggingConfig, LogtrackConfig, StoreConfig, UserConfig,
};
