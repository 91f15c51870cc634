//! In-memory log store

use super::traits::{sort_newest_first, LogStore};
use crate::domain::{LogRecord, LogbookError, OwnerId, RecordId, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Log store kept entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<LogRecord>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `records`
    pub fn with_records(records: Vec<LogRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Number of records across all owners
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl LogStore for MemoryStore {
    async fn list_for_owner(&self, owner: &OwnerId) -> Result<Vec<LogRecord>> {
        let mut records: Vec<LogRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| &r.user_id == owner)
            .cloned()
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn get(&self, id: &RecordId) -> Result<Option<LogRecord>> {
        Ok(self.records.read().await.iter().find(|r| &r.id == id).cloned())
    }

    async fn insert(&self, record: LogRecord) -> Result<()> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(LogbookError::Storage(format!(
                "Record {} already exists",
                record.id
            )));
        }
        records.push(record);
        Ok(())
    }

    async fn update(&self, record: LogRecord) -> Result<()> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| LogbookError::Storage(format!("Record {} not found", record.id)))?;
        *slot = record;
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> Result<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| &r.id != id);
        Ok(records.len() != before)
    }

    async fn insert_many(&self, new_records: Vec<LogRecord>) -> Result<usize> {
        let mut records = self.records.write().await;
        for (i, record) in new_records.iter().enumerate() {
            let clash = records.iter().any(|r| r.id == record.id)
                || new_records[..i].iter().any(|r| r.id == record.id);
            if clash {
                return Err(LogbookError::Storage(format!(
                    "Record {} already exists",
                    record.id
                )));
            }
        }
        let count = new_records.len();
        records.extend(new_records);
        Ok(count)
    }
}
