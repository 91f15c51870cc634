//! Core business logic for logtrack.
//!
//! # Modules
//!
//! - [`partition`] - Exclusion filter, week numbering and weekly grouping
//! - [`render`] - `.docx` template rendering
//! - [`export`] - Export orchestration, archive packaging and summary
//! - [`entries`] - Entry validation and add/edit/remove/list
//! - [`progress`] - Progress statistics
//! - [`transfer`] - JSON backup and import
//!
//! # Export Workflow
//!
//! 1. **Load**: read the owner's records from the log store
//! 2. **Filter**: drop records matching the exclusion options
//! 3. **Partition**: number records by week and group them
//! 4. **Fetch**: download the template once
//! 5. **Render**: fill one document per week
//! 6. **Package**: zip the documents and write `documents.zip`
//!
//! # Example
//!
//! ```rust,no_run
//! use logtrack::config::load_config;
//! use logtrack::core::export::{ExportCoordinator, ExportRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("logtrack.toml")?;
//! let coordinator = ExportCoordinator::from_config(&config)?;
//! let summary = coordinator
//!     .execute_export(&ExportRequest::from_config(&config)?)
//!     .await?;
//!
//! println!("Documents: {}", summary.document_count());
//! # Ok(())
//! # }
//! ```

pub mod entries;
pub mod export;
pub mod partition;
pub mod progress;
pub mod render;
pub mod transfer;
