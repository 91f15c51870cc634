//! Log store abstraction
//!
//! This module defines the trait log store backends implement.

use crate::domain::{LogRecord, OwnerId, RecordId, Result};
use async_trait::async_trait;

/// Persistent collection of log records
///
/// Implementations must return records of one owner ordered by date
/// descending, newest creation first among equal dates.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Records of `owner`, date descending
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    async fn list_for_owner(&self, owner: &OwnerId) -> Result<Vec<LogRecord>>;

    /// Record with the given id, if any
    async fn get(&self, id: &RecordId) -> Result<Option<LogRecord>>;

    /// Adds a record
    ///
    /// # Errors
    ///
    /// Returns a storage error if a record with the same id exists.
    async fn insert(&self, record: LogRecord) -> Result<()>;

    /// Replaces the record with the same id
    ///
    /// # Errors
    ///
    /// Returns a storage error if no record has that id.
    async fn update(&self, record: LogRecord) -> Result<()>;

    /// Removes a record, returning true if it existed
    async fn delete(&self, id: &RecordId) -> Result<bool>;

    /// Adds many records in one write, returning how many were added
    ///
    /// # Errors
    ///
    /// Returns a storage error if any id is already taken; nothing is written then.
    async fn insert_many(&self, records: Vec<LogRecord>) -> Result<usize>;
}

/// Sorts records by date descending, then creation time descending
pub fn sort_newest_first(records: &mut [LogRecord]) {
    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
