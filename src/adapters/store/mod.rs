//! Log record persistence
//!
//! - [`JsonFileStore`] - records in a single JSON file (the CLI's store)
//! - [`MemoryStore`] - records in memory

pub mod json_file;
pub mod memory;
pub mod traits;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{sort_newest_first, LogStore};

use crate::config::StoreConfig;
use std::sync::Arc;

/// Create the log store described by the configuration
pub fn create_log_store(config: &StoreConfig) -> Arc<dyn LogStore> {
    tracing::debug!(path = %config.path, "Opening JSON file log store");
    Arc::new(JsonFileStore::new(config.path_buf()))
}
