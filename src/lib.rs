// logtrack - Internship logbook with weekly document export
// Copyright (c) 2025 logtrack Contributors
// Licensed under the MIT License

//! # logtrack - Internship logbook with weekly document export
//!
//! logtrack keeps a daily activity log for an internship and turns it into
//! the weekly logbook documents many programmes ask for: one `.docx` per
//! internship week, rendered from a Word template and packaged into a single
//! `documents.zip`.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Recording** one entry per working day, tagged as activity or leave
//! - **Partitioning** entries into internship weeks (week 1 is the
//!   Monday-to-Sunday week holding the start date)
//! - **Rendering** each week through a `.docx` template with scalar tags and loops
//! - **Packaging** the documents into one archive, all or nothing
//! - **Tracking** progress and moving entries in and out as JSON backups
//!
//! ## Architecture
//!
//! logtrack follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (partition, render, export, entries, progress, transfer)
//! - [`adapters`] - External integrations (JSON log store, template sources)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logtrack::config::load_config;
//! use logtrack::core::export::{ExportCoordinator, ExportRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("logtrack.toml")?;
//!
//!     // Create export coordinator
//!     let coordinator = ExportCoordinator::from_config(&config)?;
//!
//!     // Execute export
//!     let summary = coordinator
//!         .execute_export(&ExportRequest::from_config(&config)?)
//!         .await?;
//!
//!     println!("Wrote {} weekly documents", summary.document_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Week Numbers
//!
//! ```rust
//! use chrono::NaiveDate;
//! use logtrack::core::partition::week_number_for;
//! use logtrack::domain::DateRange;
//!
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//! ).unwrap();
//!
//! // The Monday before a mid-week start still belongs to week 1
//! assert_eq!(week_number_for(&range, "2024-01-01").unwrap(), 1);
//! assert_eq!(week_number_for(&range, "2024-01-08").unwrap(), 2);
//! ```
//!
//! ## Error Handling
//!
//! logtrack uses the [`domain::LogbookError`] type for all errors; export
//! failures are wrapped [`domain::ExportError`] values:
//!
//! ```rust,no_run
//! use logtrack::domain::LogbookError;
//!
//! fn example() -> Result<(), LogbookError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = logtrack::config::load_config("logtrack.toml")?;
//!     config.user.owner_id()?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
