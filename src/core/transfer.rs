//! JSON backup and import
//!
//! Backups are a pretty-printed JSON array of the owner's records with the
//! `id` field removed. Imports accept such a file (or any array of objects
//! carrying `date`, `activity` and optionally `leaveType`), skip entries
//! outside the internship period and store the rest in one batch with fresh
//! ids and timestamps.

use crate::adapters::store::LogStore;
use crate::domain::{
    leave, parse_calendar_date, DateRange, LeaveType, LogRecord, LogbookError, OwnerId, RecordId,
    Result,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Backup file name for the given day, `internship-logs-YYYY-MM-DD.json`
pub fn backup_file_name(today: NaiveDate) -> String {
    format!("internship-logs-{}.json", today.format(crate::domain::DATE_FORMAT))
}

/// Serializes records without their ids
///
/// # Errors
///
/// Returns a validation error when there are no records.
pub fn backup_json(records: &[LogRecord]) -> Result<String> {
    if records.is_empty() {
        return Err(LogbookError::Validation(
            "There are no logs to export".to_string(),
        ));
    }

    let sanitized = records
        .iter()
        .map(|record| -> Result<Value> {
            let mut value = serde_json::to_value(record)?;
            if let Value::Object(map) = &mut value {
                map.remove("id");
            }
            Ok(value)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(serde_json::to_string_pretty(&sanitized)?)
}

/// Writes the owner's backup to `target`, or to the dated file name in the
/// current directory when no target is given
///
/// Returns the path written and the number of records.
pub async fn write_backup(
    store: &dyn LogStore,
    owner: &OwnerId,
    target: Option<PathBuf>,
    today: NaiveDate,
) -> Result<(PathBuf, usize)> {
    let records = store.list_for_owner(owner).await?;
    let json = backup_json(&records)?;
    let path = target.unwrap_or_else(|| PathBuf::from(backup_file_name(today)));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, json).await.map_err(|e| {
        LogbookError::Io(format!("Failed to write backup {}: {e}", path.display()))
    })?;

    tracing::info!(path = %path.display(), records = records.len(), "Backup written");
    Ok((path, records.len()))
}

/// One entry of an import file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportEntry {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    activity: String,
    #[serde(default, deserialize_with = "leave::deserialize_lenient")]
    leave_type: Option<LeaveType>,
}

/// Outcome of an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportOutcome {
    /// Entries stored
    pub imported: usize,
    /// Entries left out (outside the period or without a usable date)
    pub skipped: usize,
}

/// Turns import file contents into records ready to store
///
/// Entries whose date falls outside a configured bound, or that have no
/// parsable date, are skipped. Every accepted entry gets a new id, the
/// given owner and `now` as both creation and update time.
///
/// # Errors
///
/// Returns a validation error "Invalid file format" unless the contents are
/// a JSON array of objects.
pub fn prepare_import(
    contents: &str,
    owner: &OwnerId,
    range: &DateRange,
    now: DateTime<Utc>,
) -> Result<(Vec<LogRecord>, usize)> {
    let invalid = || LogbookError::Validation("Invalid file format".to_string());

    let value: Value = serde_json::from_str(contents).map_err(|_| invalid())?;
    let Value::Array(items) = value else {
        return Err(invalid());
    };

    let mut accepted = Vec::with_capacity(items.len());
    let mut skipped = 0;

    for item in items {
        let entry: ImportEntry = serde_json::from_value(item).map_err(|_| invalid())?;

        let date = match entry.date.as_deref().map(parse_calendar_date) {
            Some(Ok(date)) if range.admits(date) => date,
            _ => {
                skipped += 1;
                continue;
            }
        };

        accepted.push(LogRecord {
            id: RecordId::generate(),
            user_id: owner.clone(),
            date: date.to_string(),
            activity: entry.activity.replace("\r\n", "\n"),
            leave_type: entry.leave_type,
            created_at: now,
            updated_at: Some(now),
        });
    }

    Ok((accepted, skipped))
}

/// Imports a backup file into the store in one batch
///
/// # Errors
///
/// Returns a validation error for a malformed file, an I/O error if it
/// cannot be read, or a storage error if the batch write fails.
pub async fn import_file(
    store: &dyn LogStore,
    owner: &OwnerId,
    range: &DateRange,
    path: &Path,
) -> Result<ImportOutcome> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        LogbookError::Io(format!("Failed to read {}: {e}", path.display()))
    })?;

    let (records, skipped) = prepare_import(&contents, owner, range, Utc::now())?;
    let imported = if records.is_empty() {
        0
    } else {
        store.insert_many(records).await?
    };

    tracing::info!(
        path = %path.display(),
        imported = imported,
        skipped = skipped,
        "Import finished"
    );
    Ok(ImportOutcome { imported, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn owner() -> OwnerId {
        OwnerId::new("u2").unwrap()
    }

    #[test]
    fn test_backup_file_name() {
        assert_eq!(backup_file_name(d(2024, 3, 9)), "internship-logs-2024-03-09.json");
    }

    #[test]
    fn test_backup_strips_ids() {
        let record = LogRecord::new(owner(), d(2024, 1, 2), "Set up CI pipeline", LeaveType::Activity);
        let json = backup_json(&[record]).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert!(parsed[0].get("id").is_none());
        assert_eq!(parsed[0]["userId"], "u2");
        assert_eq!(parsed[0]["activity"], "Set up CI pipeline");
        assert!(json.contains("\n  "));
    }

    #[test]
    fn test_backup_empty_is_validation_error() {
        let err = backup_json(&[]).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: There are no logs to export");
    }

    #[test]
    fn test_prepare_import_rejects_non_array() {
        let range = DateRange::default();
        for contents in ["{\"date\": \"2024-01-01\"}", "not json", "[1, 2]"] {
            let err = prepare_import(contents, &owner(), &range, Utc::now()).unwrap_err();
            assert!(err.to_string().contains("Invalid file format"), "{contents}");
        }
    }

    #[test]
    fn test_prepare_import_skips_out_of_range() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let contents = r#"[
            {"userId": "old", "date": "2023-12-31", "activity": "Before the start"},
            {"userId": "old", "date": "2024-01-15", "activity": "Inside", "leaveType": "mc",
             "createdAt": "2024-01-15T08:00:00Z"},
            {"date": "2024-02-01", "activity": "After the end"},
            {"activity": "No date at all"}
        ]"#;
        let now = Utc::now();
        let (records, skipped) = prepare_import(contents, &owner(), &range, now).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(skipped, 3);
        let record = &records[0];
        assert_eq!(record.user_id, owner());
        assert_eq!(record.date, "2024-01-15");
        assert_eq!(record.leave_type, Some(LeaveType::Mc));
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, Some(now));
    }

    #[test]
    fn test_prepare_import_open_range_admits_everything() {
        let contents = r#"[{"date": "1999-01-01", "activity": "Long ago"}]"#;
        let (records, skipped) =
            prepare_import(contents, &owner(), &DateRange::default(), Utc::now()).unwrap();
        assert_eq!((records.len(), skipped), (1, 0));
    }

    #[test]
    fn test_prepare_import_assigns_fresh_ids() {
        let contents = r#"[
            {"date": "2024-01-02", "activity": "One"},
            {"date": "2024-01-03", "activity": "Two"}
        ]"#;
        let (records, _) =
            prepare_import(contents, &owner(), &DateRange::default(), Utc::now()).unwrap();
        assert_ne!(records[0].id, records[1].id);
    }
}
