//! Import command implementation

use super::{load_validated, report_failure};
use crate::adapters::store::create_log_store;
use crate::core::transfer::import_file;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON backup file to import
    pub file: PathBuf,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file.display(), "Starting import command");

        let config = match load_validated(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let owner = match config.user.owner_id() {
            Ok(o) => o,
            Err(e) => return Ok(report_failure("Import", &e)),
        };
        let range = config.user.date_range();
        let store = create_log_store(&config.store);

        println!("📥 Importing {} into the logbook of {owner}", self.file.display());
        if range.start.is_some() || range.end.is_some() {
            println!("   Keeping entries within {range}");
        }

        match import_file(store.as_ref(), &owner, &range, &self.file).await {
            Ok(outcome) => {
                println!("✅ Imported {} entries", outcome.imported);
                if outcome.skipped > 0 {
                    println!("⚠️  Skipped {} entries (outside the internship period or undated)", outcome.skipped);
                }
                Ok(0)
            }
            Err(e) => Ok(report_failure("Import", &e)),
        }
    }
}
