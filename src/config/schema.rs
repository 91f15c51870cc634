//! Configuration schema types
//!
//! This module defines the configuration structure for logtrack.

use crate::core::partition::ExclusionOptions;
use crate::domain::{DateRange, LogbookError, OwnerId, Result, TemplateSpec, WeekendSystem};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main logtrack configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogtrackConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Logbook owner profile and internship period
    pub user: UserConfig,

    /// Log store location
    #[serde(default)]
    pub store: StoreConfig,

    /// Weekly export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LogtrackConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.application.validate()?;
        self.user.validate()?;
        self.store.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (plan the export without fetching or writing anything)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Logbook owner and internship period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Owner id stamped on every record
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Which two weekdays are the weekend; unset means every day is a working day
    #[serde(default)]
    pub weekend_system: Option<WeekendSystem>,

    /// First day of the internship, `YYYY-MM-DD`
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Last day of the internship, `YYYY-MM-DD`
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl UserConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("user.id cannot be empty".to_string());
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(format!(
                    "user.start_date ({start}) must not be after user.end_date ({end})"
                ));
            }
        }
        Ok(())
    }

    /// Typed owner id
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the id is empty
    pub fn owner_id(&self) -> Result<OwnerId> {
        OwnerId::new(self.id.trim()).map_err(LogbookError::Configuration)
    }

    /// Internship period; bounds that are not configured stay unset
    pub fn date_range(&self) -> DateRange {
        DateRange::from_bounds(self.start_date, self.end_date)
    }
}

/// Log store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON file holding the log records
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl StoreConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("store.path cannot be empty".to_string());
        }
        Ok(())
    }

    /// Store path as a filesystem path
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Weekly export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Template key (`basic` or `umpsa-psm-2023`)
    #[serde(default = "default_template")]
    pub template: String,

    /// Overrides the template's built-in URL (http(s), file:// or a local path)
    #[serde(default)]
    pub template_url: Option<String>,

    /// Directory `documents.zip` is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Template download timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Categories left out of the export
    #[serde(default)]
    pub exclusions: ExclusionOptions,

    /// Identifying fields placed in every document (student_id, student_name, ...)
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl ExportConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        TemplateSpec::lookup(&self.template).map_err(|e| e.to_string())?;

        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("export.timeout_seconds must be greater than 0".to_string());
        }

        if let Some(url) = &self.template_url {
            if url.trim().is_empty() {
                return Err("export.template_url cannot be empty when set".to_string());
            }
        }

        Ok(())
    }

    /// Selected template with the URL override applied
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown template key
    pub fn template_spec(&self) -> Result<TemplateSpec> {
        let spec = TemplateSpec::lookup(&self.template)?;
        Ok(match &self.template_url {
            Some(url) => spec.with_url(url.trim()),
            None => spec,
        })
    }

    /// Output directory as a filesystem path
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            template_url: None,
            output_dir: default_output_dir(),
            timeout_seconds: default_timeout_seconds(),
            exclusions: ExclusionOptions::default(),
            fields: BTreeMap::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_store_path() -> String {
    "logtrack-data/logs.json".to_string()
}

fn default_template() -> String {
    "basic".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserConfig {
        UserConfig {
            id: "u1".to_string(),
            name: Some("Aina".to_string()),
            weekend_system: None,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30),
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_user_config_validation() {
        let mut config = user();
        assert!(config.validate().is_ok());

        config.start_date = NaiveDate::from_ymd_opt(2024, 7, 1);
        assert!(config.validate().unwrap_err().contains("must not be after"));

        config = user();
        config.id = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_user_date_range_keeps_missing_bounds() {
        let mut config = user();
        config.end_date = None;
        let range = config.date_range();
        assert!(range.start.is_some());
        assert!(!range.is_complete());
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert!(config.validate().is_ok());

        config.template = "nope".to_string();
        assert!(config.validate().is_err());

        config = ExportConfig::default();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());

        config = ExportConfig::default();
        config.template_url = Some(" ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_template_url_override() {
        let config = ExportConfig {
            template: "umpsa-psm-2023".to_string(),
            template_url: Some("file:///tmp/t.docx".to_string()),
            ..Default::default()
        };
        let spec = config.template_spec().unwrap();
        assert_eq!(spec.key, "umpsa-psm-2023");
        assert_eq!(spec.url, "file:///tmp/t.docx");
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: LogtrackConfig = toml::from_str(
            r#"
[user]
id = "u1"
start_date = "2024-01-01"
end_date = "2024-03-31"
weekend_system = "saturday-sunday"

[export.exclusions]
exclude_mc = true

[export.fields]
student_id = "CB21001"
"#,
        )
        .unwrap();

        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.store.path, "logtrack-data/logs.json");
        assert_eq!(config.export.template, "basic");
        assert!(config.export.exclusions.exclude_mc);
        assert!(!config.export.exclusions.exclude_public_holidays);
        assert_eq!(config.export.fields["student_id"], "CB21001");
        assert_eq!(config.user.weekend_system, Some(WeekendSystem::SaturdaySunday));
        assert!(config.validate().is_ok());
    }
}
