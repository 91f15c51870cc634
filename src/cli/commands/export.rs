//! Export command implementation
//!
//! This module implements the `export` command, which renders one document
//! per internship week and writes them to `documents.zip`.

use super::{load_validated, report_failure};
use crate::config::LogtrackConfig;
use crate::core::export::{ExportCoordinator, ExportRequest, ExportSummary};
use crate::domain::LogbookError;
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Dry run mode - plan the documents without fetching the template or writing the archive
    #[arg(long)]
    pub dry_run: bool,

    /// Override the template key (basic, umpsa-psm-2023)
    #[arg(long)]
    pub template: Option<String>,

    /// Override the URL or path the template is fetched from
    #[arg(long)]
    pub template_url: Option<String>,

    /// Override the output directory
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Leave public holidays out of the export
    #[arg(long)]
    pub exclude_public_holidays: bool,

    /// Leave medical leave out of the export
    #[arg(long)]
    pub exclude_mc: bool,

    /// Leave annual leave out of the export
    #[arg(long)]
    pub exclude_annual_leave: bool,

    /// Leave emergency leave out of the export
    #[arg(long)]
    pub exclude_emergency_leave: bool,

    /// Document field as key=value (repeatable), e.g. --field student_id=CB21001
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_field)]
    pub field: Vec<(String, String)>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_validated(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        self.apply_overrides(&mut config);

        // Overrides may have introduced an unknown template key
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            return Ok(2);
        }

        let request = match ExportRequest::from_config(&config) {
            Ok(r) => r,
            Err(e) => return Ok(report_failure("Export setup", &e)),
        };

        let missing = request.template.missing_fields(&request.fields);
        if !missing.is_empty() {
            println!("❌ Template '{}' needs more fields", request.template.key);
            for key in missing {
                println!("   Missing: {key} (set [export.fields] or pass --field {key}=...)");
            }
            return Ok(2);
        }

        if request.dry_run {
            tracing::info!("Dry run mode enabled - nothing will be written");
            println!("🔍 DRY RUN MODE - The template will not be fetched and no archive written");
            println!();
        }

        let coordinator = match ExportCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Export setup", &e)),
        };

        println!("🚀 Starting export...");
        println!("   Template: {} ({})", request.template.label, request.template.url);
        println!("   Period: {}", request.range);
        println!();

        match coordinator.execute_export(&request).await {
            Ok(summary) => {
                print_summary(&summary);
                Ok(0)
            }
            Err(LogbookError::Export(e @ crate::domain::ExportError::EmptyResult)) => {
                println!("⚠️  Nothing to export");
                println!("   {e}");
                Ok(1)
            }
            Err(e) => Ok(report_failure("Export", &e)),
        }
    }

    fn apply_overrides(&self, config: &mut LogtrackConfig) {
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Some(template) = &self.template {
            tracing::info!(template = %template, "Overriding template from CLI");
            config.export.template = template.clone();
        }

        if let Some(url) = &self.template_url {
            tracing::info!(template_url = %url, "Overriding template URL from CLI");
            config.export.template_url = Some(url.clone());
        }

        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            config.export.output_dir = dir.clone();
        }

        // Flags only ever add exclusions on top of the configured ones
        let exclusions = &mut config.export.exclusions;
        exclusions.exclude_public_holidays |= self.exclude_public_holidays;
        exclusions.exclude_mc |= self.exclude_mc;
        exclusions.exclude_annual_leave |= self.exclude_annual_leave;
        exclusions.exclude_emergency_leave |= self.exclude_emergency_leave;

        for (key, value) in &self.field {
            config.export.fields.insert(key.clone(), value.clone());
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary");
    println!("═══════════════════════════════════════");
    println!("Template: {}", summary.template);
    println!("Records considered: {}", summary.records_considered);
    println!("Records excluded: {}", summary.records_excluded);
    println!("Records exported: {}", summary.records_included());
    println!("Weeks: {}", summary.weeks.len());
    println!("Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    println!("Documents:");
    for name in &summary.documents {
        println!("  • {name}");
    }
    println!();

    match &summary.archive_path {
        Some(path) => {
            println!("✅ Archive written: {} ({} bytes)", path.display(), summary.archive_bytes);
        }
        None if summary.dry_run => {
            println!("✅ Dry run complete, {} document(s) planned", summary.document_count());
        }
        None => {}
    }
}

/// Parses a `key=value` pair
fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    fn args() -> ExportArgs {
        ExportArgs {
            dry_run: false,
            template: None,
            template_url: None,
            output_dir: None,
            exclude_public_holidays: false,
            exclude_mc: false,
            exclude_annual_leave: false,
            exclude_emergency_leave: false,
            field: Vec::new(),
        }
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("student_name=Nur Aina").unwrap(),
            ("student_name".to_string(), "Nur Aina".to_string())
        );
        assert_eq!(
            parse_field("url=a=b").unwrap(),
            ("url".to_string(), "a=b".to_string())
        );
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn test_overrides_add_to_config() {
        let mut config = parse_config(
            r#"
[user]
id = "u1"

[export.exclusions]
exclude_annual_leave = true

[export.fields]
student_id = "CB21001"
"#,
        )
        .unwrap();

        let mut cli = args();
        cli.exclude_mc = true;
        cli.dry_run = true;
        cli.template = Some("umpsa-psm-2023".to_string());
        cli.field = vec![("student_id".to_string(), "CB99999".to_string())];
        cli.apply_overrides(&mut config);

        assert!(config.application.dry_run);
        assert_eq!(config.export.template, "umpsa-psm-2023");
        assert!(config.export.exclusions.exclude_mc);
        assert!(config.export.exclusions.exclude_annual_leave);
        assert!(!config.export.exclusions.exclude_public_holidays);
        assert_eq!(config.export.fields["student_id"], "CB99999");
    }
}
