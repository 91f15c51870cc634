//! Status command implementation
//!
//! This module implements the `status` command for displaying internship
//! progress: days remaining, days logged, working days, completion and the
//! dates still missing a log.

use super::{load_validated, report_failure};
use crate::adapters::store::create_log_store;
use crate::core::progress::ProgressReport;
use chrono::Local;
use clap::Args;

/// Number of missing dates printed before the list is cut short
const MISSING_PREVIEW: usize = 10;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print every missing date instead of the first few
    #[arg(long)]
    pub all_missing: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking internship progress");

        let config = match load_validated(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let owner = match config.user.owner_id() {
            Ok(o) => o,
            Err(e) => return Ok(report_failure("Status", &e)),
        };

        let store = create_log_store(&config.store);
        let records = match store.list_for_owner(&owner).await {
            Ok(r) => r,
            Err(e) => return Ok(report_failure("Loading entries", &e)),
        };

        let report = ProgressReport::compute(
            &records,
            config.user.date_range(),
            config.user.weekend_system,
            Local::now().date_naive(),
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(0);
        }

        println!("📊 Internship Progress");
        println!();
        if let Some(name) = &config.user.name {
            println!("Intern: {name} ({owner})");
        } else {
            println!("Intern: {owner}");
        }
        println!("Period: {}", report.range);
        if let Some(system) = config.user.weekend_system {
            println!("Weekend: {system}");
        }
        println!();

        match report.days_remaining {
            Some(days) if report.is_complete() => {
                println!("✅ Internship period ended {} day(s) ago", -days)
            }
            Some(days) => println!("Days remaining: {days}"),
            None => println!("Days remaining: N/A (no end date configured)"),
        }
        println!("Days logged: {}", report.days_logged);
        println!("Entries: {}", report.records);
        println!("Working days: {}", report.working_days);
        println!("Completion: {:.1}%", report.completion_percent);
        println!();

        if report.missing_dates.is_empty() {
            println!("✅ No missing dates");
        } else {
            println!("⚠️  {} date(s) without a log:", report.missing_dates.len());
            let limit = if self.all_missing {
                report.missing_dates.len()
            } else {
                MISSING_PREVIEW
            };
            for date in report.missing_dates.iter().take(limit) {
                println!("  • {}", date.format("%a %Y-%m-%d"));
            }
            if report.missing_dates.len() > limit {
                println!(
                    "  ... and {} more (use --all-missing to list them)",
                    report.missing_dates.len() - limit
                );
            }
        }

        Ok(0)
    }
}
