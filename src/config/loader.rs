//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::LogtrackConfig;
use crate::domain::errors::LogbookError;
use crate::domain::result::Result;
use chrono::NaiveDate;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into LogtrackConfig
/// 4. Applies environment variable overrides (LOGTRACK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use logtrack::config::loader::load_config;
///
/// let config = load_config("logtrack.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LogtrackConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LogbookError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        LogbookError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying substitution, overrides and validation
///
/// # Errors
///
/// Same as [`load_config`], minus the file access errors.
pub fn parse_config(contents: &str) -> Result<LogtrackConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: LogtrackConfig = toml::from_str(&contents)
        .map_err(|e| LogbookError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        LogbookError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| LogbookError::Other(format!("invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Comment lines are copied untouched
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(LogbookError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_date_override(name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), crate::domain::DATE_FORMAT).map_err(|_| {
        LogbookError::Configuration(format!("{name} must be a YYYY-MM-DD date, got '{value}'"))
    })
}

/// Applies environment variable overrides using LOGTRACK_* prefix
///
/// Environment variables follow the pattern: LOGTRACK_<SECTION>_<KEY>
/// For example: LOGTRACK_USER_START_DATE, LOGTRACK_EXPORT_TEMPLATE
fn apply_env_overrides(config: &mut LogtrackConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("LOGTRACK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("LOGTRACK_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // User overrides
    if let Ok(val) = std::env::var("LOGTRACK_USER_ID") {
        config.user.id = val;
    }
    if let Ok(val) = std::env::var("LOGTRACK_USER_NAME") {
        config.user.name = Some(val);
    }
    if let Ok(val) = std::env::var("LOGTRACK_USER_WEEKEND_SYSTEM") {
        config.user.weekend_system = match val.trim() {
            "" | "none" => None,
            "friday-saturday" => Some(crate::domain::WeekendSystem::FridaySaturday),
            "saturday-sunday" => Some(crate::domain::WeekendSystem::SaturdaySunday),
            other => {
                return Err(LogbookError::Configuration(format!(
                    "LOGTRACK_USER_WEEKEND_SYSTEM must be friday-saturday, saturday-sunday or none, got '{other}'"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("LOGTRACK_USER_START_DATE") {
        config.user.start_date = Some(parse_date_override("LOGTRACK_USER_START_DATE", &val)?);
    }
    if let Ok(val) = std::env::var("LOGTRACK_USER_END_DATE") {
        config.user.end_date = Some(parse_date_override("LOGTRACK_USER_END_DATE", &val)?);
    }

    // Store overrides
    if let Ok(val) = std::env::var("LOGTRACK_STORE_PATH") {
        config.store.path = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("LOGTRACK_EXPORT_TEMPLATE") {
        config.export.template = val;
    }
    if let Ok(val) = std::env::var("LOGTRACK_EXPORT_TEMPLATE_URL") {
        config.export.template_url = Some(val);
    }
    if let Ok(val) = std::env::var("LOGTRACK_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("LOGTRACK_EXPORT_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.export.timeout_seconds = timeout;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("LOGTRACK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("LOGTRACK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("LOGTRACK_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
