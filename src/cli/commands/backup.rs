//! Backup command implementation
//!
//! Writes every entry of the configured owner to a pretty-printed JSON file
//! without record ids.

use super::{load_validated, report_failure};
use crate::adapters::store::create_log_store;
use crate::core::transfer::write_backup;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the backup command
#[derive(Args, Debug)]
pub struct BackupArgs {
    /// Output file (defaults to internship-logs-YYYY-MM-DD.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl BackupArgs {
    /// Execute the backup command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting backup command");

        let config = match load_validated(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let owner = match config.user.owner_id() {
            Ok(o) => o,
            Err(e) => return Ok(report_failure("Backup", &e)),
        };
        let store = create_log_store(&config.store);

        println!("💾 Backing up entries for {owner}");

        match write_backup(
            store.as_ref(),
            &owner,
            self.output.clone(),
            Local::now().date_naive(),
        )
        .await
        {
            Ok((path, count)) => {
                println!("✅ {count} entries written to {}", path.display());
                Ok(0)
            }
            Err(e) => Ok(report_failure("Backup", &e)),
        }
    }
}
