//! External system integrations for logtrack.
//!
//! - [`store`] - Log record persistence (trait-based)
//! - [`template`] - Template retrieval over HTTP or from disk
//!
//! # Design Pattern
//!
//! Adapters isolate I/O behind async traits so the export pipeline can be
//! driven by in-memory stores and local templates in tests.
//!
//! ```rust,no_run
//! use logtrack::adapters::store::{JsonFileStore, LogStore};
//! use logtrack::domain::OwnerId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::new("logtrack-data/logs.json");
//! let records = store.list_for_owner(&OwnerId::new("u1")?).await?;
//! println!("{} records", records.len());
//! # Ok(())
//! # }
//! ```

pub mod store;
pub mod template;
