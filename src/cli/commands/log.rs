//! Log entry commands: `log add`, `log edit`, `log remove`, `log list`

use super::{load_validated, report_failure};
use crate::adapters::store::create_log_store;
use crate::config::LogtrackConfig;
use crate::core::entries::{EntryDraft, EntryPolicy, Logbook};
use crate::domain::{LeaveType, LogRecord, LogbookError, RecordId};
use clap::{Args, Subcommand};
use std::io::{self, Write};

/// Log entry subcommands
#[derive(Subcommand, Debug)]
pub enum LogCommand {
    /// Add an entry
    Add(AddArgs),
    /// Change an existing entry
    Edit(EditArgs),
    /// Delete an entry
    Remove(RemoveArgs),
    /// List entries, newest first
    List(ListArgs),
}

impl LogCommand {
    /// Execute the selected log subcommand
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_validated(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let book = match open_logbook(&config) {
            Ok(b) => b,
            Err(e) => return Ok(report_failure("Opening logbook", &e)),
        };

        match self {
            LogCommand::Add(args) => args.execute(&book).await,
            LogCommand::Edit(args) => args.execute(&book).await,
            LogCommand::Remove(args) => args.execute(&book).await,
            LogCommand::List(args) => args.execute(&book).await,
        }
    }
}

fn open_logbook(config: &LogtrackConfig) -> crate::domain::Result<Logbook> {
    Ok(Logbook::new(
        create_log_store(&config.store),
        config.user.owner_id()?,
        EntryPolicy::from_user(&config.user),
    ))
}

/// Arguments for `log add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Date of the entry (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// What was done; leave entries default to their standard text
    #[arg(short, long)]
    pub activity: Option<String>,

    /// Entry type (activity, holiday, mc, annual, emergency)
    #[arg(short = 't', long, default_value = "activity")]
    pub leave_type: LeaveType,
}

impl AddArgs {
    async fn execute(&self, book: &Logbook) -> anyhow::Result<i32> {
        let draft = EntryDraft {
            date: self.date.clone(),
            activity: self.activity.clone(),
            leave_type: self.leave_type,
        };

        match book.add(&draft).await {
            Ok(record) => {
                println!("✅ Log added for {} ({})", record.date, record.id);
                Ok(0)
            }
            Err(e) => Ok(report_failure("Adding log", &e)),
        }
    }
}

/// Arguments for `log edit`
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Id of the entry to change
    pub id: RecordId,

    /// New date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// New activity text
    #[arg(short, long)]
    pub activity: Option<String>,

    /// New entry type
    #[arg(short = 't', long)]
    pub leave_type: Option<LeaveType>,
}

impl EditArgs {
    async fn execute(&self, book: &Logbook) -> anyhow::Result<i32> {
        let current = match find(book, &self.id).await {
            Ok(record) => record,
            Err(e) => return Ok(report_failure("Editing log", &e)),
        };

        // Unspecified values keep what the entry has today
        let draft = EntryDraft {
            date: self.date.clone().unwrap_or_else(|| current.date.clone()),
            activity: Some(
                self.activity
                    .clone()
                    .unwrap_or_else(|| current.activity.clone()),
            ),
            leave_type: self
                .leave_type
                .or(current.leave_type)
                .unwrap_or(LeaveType::Activity),
        };

        match book.edit(&self.id, &draft).await {
            Ok(record) => {
                println!("✅ Log updated for {} ({})", record.date, record.id);
                Ok(0)
            }
            Err(e) => Ok(report_failure("Editing log", &e)),
        }
    }
}

/// Arguments for `log remove`
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Id of the entry to delete
    pub id: RecordId,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl RemoveArgs {
    async fn execute(&self, book: &Logbook) -> anyhow::Result<i32> {
        let record = match find(book, &self.id).await {
            Ok(record) => record,
            Err(e) => return Ok(report_failure("Removing log", &e)),
        };

        if !self.yes {
            println!("Entry {} ({}):", record.id, record.date);
            println!("  {}", first_line(&record.activity));
            print!("Delete this entry? [y/N]: ");
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Removal cancelled.");
                return Ok(0);
            }
        }

        match book.remove(&self.id).await {
            Ok(()) => {
                println!("✅ Log deleted ({})", self.id);
                Ok(0)
            }
            Err(e) => Ok(report_failure("Removing log", &e)),
        }
    }
}

/// Arguments for `log list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show at most this many entries
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    async fn execute(&self, book: &Logbook) -> anyhow::Result<i32> {
        let records = match book.list().await {
            Ok(r) => r,
            Err(e) => return Ok(report_failure("Listing logs", &e)),
        };
        let shown = &records[..self.limit.unwrap_or(records.len()).min(records.len())];

        if self.json {
            println!("{}", serde_json::to_string_pretty(shown)?);
            return Ok(0);
        }

        if records.is_empty() {
            println!("No log entries yet.");
            println!("Run 'logtrack log add --date YYYY-MM-DD --activity \"...\"' to add one.");
            return Ok(0);
        }

        println!("📒 {} of {} entries for {}", shown.len(), records.len(), book.owner());
        println!();
        for record in shown {
            let tag = record.leave_type.unwrap_or(LeaveType::Activity);
            println!("{}  [{}]  {}", record.date, tag, record.id);
            for line in record.activity.lines() {
                println!("    {line}");
            }
        }

        Ok(0)
    }
}

async fn find(book: &Logbook, id: &RecordId) -> crate::domain::Result<LogRecord> {
    book.list()
        .await?
        .into_iter()
        .find(|r| &r.id == id)
        .ok_or_else(|| LogbookError::Validation(format!("No log entry with id {id}")))
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
