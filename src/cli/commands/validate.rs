//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the logtrack configuration file.

use crate::config::load_config;
use crate::domain::TemplateSpec;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Validate configuration
        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            println!();
            return Ok(2);
        }

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  User: {}", config.user.id);
        if let Some(name) = &config.user.name {
            println!("  Name: {name}");
        }
        println!("  Period: {}", config.user.date_range());
        println!(
            "  Weekend: {}",
            config
                .user
                .weekend_system
                .map_or("none".to_string(), |w| w.to_string())
        );
        println!("  Store: {}", config.store.path);
        println!("  Output Directory: {}", config.export.output_dir);

        // validate() has already checked the key
        let template = match config.export.template_spec() {
            Ok(t) => t,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };
        println!("  Template: {} ({})", template.label, template.key);
        println!("  Template URL: {}", template.url);

        let missing = template.missing_fields(&config.export.fields);
        if missing.is_empty() {
            println!("  Fields: complete");
        } else {
            println!("  ⚠️  Fields missing for export: {}", missing.join(", "));
        }

        let exclusions: Vec<_> = config
            .export
            .exclusions
            .excluded_types()
            .map(|t| t.label())
            .collect();
        if !exclusions.is_empty() {
            println!("  Excluded: {}", exclusions.join(", "));
        }
        println!();

        println!("Available templates:");
        for spec in TemplateSpec::all() {
            println!("  {:<16} {}", spec.key, spec.description);
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute("/nonexistent/logtrack.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[user]
id = "u1"
start_date = "2024-01-01"
end_date = "2024-03-31"
"#
        )
        .unwrap();

        let path = file.path().to_string_lossy().to_string();
        let code = ValidateArgs {}.execute(&path).await.unwrap();
        assert_eq!(code, 0);
    }
}
