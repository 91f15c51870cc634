//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "logtrack.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing logtrack configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your internship period", self.output);
                println!("  2. Fill in [export.fields] for your template");
                println!("  3. Validate configuration: logtrack validate-config");
                println!("  4. Add entries: logtrack log add --date YYYY-MM-DD --activity \"...\"");
                println!("  5. Run export: logtrack export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# logtrack Configuration File
# Internship logbook with weekly document export

[application]
log_level = "info"
dry_run = false

[user]
id = "${USER}"
name = "Your Name"
weekend_system = "saturday-sunday"  # saturday-sunday | friday-saturday
start_date = "2024-01-01"
end_date = "2024-06-30"

[store]
path = "logtrack-data/logs.json"

[export]
template = "basic"  # basic | umpsa-psm-2023
output_dir = "output"
timeout_seconds = 30

[export.exclusions]
exclude_public_holidays = false
exclude_mc = false
exclude_annual_leave = false
exclude_emergency_leave = false

[export.fields]
student_id = ""
student_name = ""
industry_name = ""

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# logtrack Configuration File
# Internship logbook with weekly document export
#
# This file contains all configuration options with examples and explanations.
#
# Values may reference environment variables with ${VAR}. Any option can
# also be overridden with a LOGTRACK_<SECTION>_<KEY> environment variable,
# e.g. LOGTRACK_EXPORT_OUTPUT_DIR=/tmp/out.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (plan the export without fetching the template or writing files)
dry_run = false

# ============================================================================
# Intern Profile
# ============================================================================
[user]
# Owner id stamped on every entry
id = "${USER}"

# Display name
name = "Nur Aina"

# Weekend days refused for logging and left out of working-day counts:
#   saturday-sunday | friday-saturday
# Remove the line to treat every day as a working day.
weekend_system = "saturday-sunday"

# Internship period (inclusive, YYYY-MM-DD). Week 1 is the Monday-to-Sunday
# week containing start_date.
start_date = "2024-01-01"
end_date = "2024-06-30"

# ============================================================================
# Log Store
# ============================================================================
[store]
# JSON file holding every entry
path = "logtrack-data/logs.json"

# ============================================================================
# Weekly Export
# ============================================================================
[export]
# Template key:
#   basic          - Basic template for general use
#   umpsa-psm-2023 - Template for UMPSA PSM 2023
template = "basic"

# Fetch the template from somewhere else (http(s) URL or local .docx path)
# template_url = "./templates/my-logbook.docx"

# Directory receiving documents.zip
output_dir = "output"

# Template download timeout in seconds
timeout_seconds = 30

# Categories left out of the export. An entry is dropped when its type
# matches, or when its activity text mentions the category keyword
# (holiday, mc, annual, emergency).
[export.exclusions]
exclude_public_holidays = false
exclude_mc = false
exclude_annual_leave = false
exclude_emergency_leave = false

# Values placed in every document. Each template lists the fields it needs;
# `logtrack validate-config` reports the missing ones.
[export.fields]
student_id = "CB21001"
student_name = "Nur Aina"
industry_name = "Acme Sdn Bhd"
# Needed by umpsa-psm-2023:
# industry_coach_name = "Mr. Tan"
# academic_tutor_name = "Dr. Lim"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Write JSON logs to local files
local_enabled = true

# Log directory
local_path = "./logs"

# Rotation: daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
