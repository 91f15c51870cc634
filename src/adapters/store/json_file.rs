//! JSON file log store
//!
//! The whole store is one JSON array of records. Every mutation reads the
//! file, applies the change and writes a sibling temp file that is renamed
//! over the original.

use super::traits::{sort_newest_first, LogStore};
use crate::domain::{LogRecord, LogbookError, OwnerId, RecordId, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Log store backed by a single JSON file
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store for `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<LogRecord>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(LogbookError::Storage(format!(
                    "Failed to read log store {}: {e}",
                    self.path.display()
                )))
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            LogbookError::Storage(format!(
                "Log store {} is not a valid record list: {e}",
                self.path.display()
            ))
        })
    }

    async fn write_all(&self, records: &[LogRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(records)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json).await.map_err(|e| {
            LogbookError::Storage(format!("Failed to write {}: {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            LogbookError::Storage(format!(
                "Failed to replace log store {}: {e}",
                self.path.display()
            ))
        })?;

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Log store written"
        );
        Ok(())
    }
}

#[async_trait]
impl LogStore for JsonFileStore {
    async fn list_for_owner(&self, owner: &OwnerId) -> Result<Vec<LogRecord>> {
        let mut records: Vec<LogRecord> = self
            .read_all()
            .await?
            .into_iter()
            .filter(|r| &r.user_id == owner)
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn get(&self, id: &RecordId) -> Result<Option<LogRecord>> {
        Ok(self.read_all().await?.into_iter().find(|r| &r.id == id))
    }

    async fn insert(&self, record: LogRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        if records.iter().any(|r| r.id == record.id) {
            return Err(LogbookError::Storage(format!(
                "Record {} already exists",
                record.id
            )));
        }
        records.push(record);
        self.write_all(&records).await
    }

    async fn update(&self, record: LogRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let slot = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| LogbookError::Storage(format!("Record {} not found", record.id)))?;
        *slot = record;
        self.write_all(&records).await
    }

    async fn delete(&self, id: &RecordId) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records).await?;
        Ok(true)
    }

    async fn insert_many(&self, new_records: Vec<LogRecord>) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;

        let mut taken: HashSet<String> = records.iter().map(|r| r.id.to_string()).collect();
        for record in &new_records {
            if !taken.insert(record.id.to_string()) {
                return Err(LogbookError::Storage(format!(
                    "Record {} already exists",
                    record.id
                )));
            }
        }

        let count = new_records.len();
        records.extend(new_records);
        self.write_all(&records).await?;
        Ok(count)
    }
}
