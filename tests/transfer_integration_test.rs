//! Backup, import and entry management against the JSON file store

use chrono::NaiveDate;
use logtrack::adapters::store::{JsonFileStore, LogStore};
use logtrack::core::entries::{EntryDraft, EntryPolicy, Logbook};
use logtrack::core::progress::ProgressReport;
use logtrack::core::transfer::{backup_file_name, import_file, write_backup};
use logtrack::domain::{DateRange, LeaveType, LogbookError, OwnerId, WeekendSystem};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, day).unwrap()
}

fn draft(date: &str, activity: &str, leave_type: LeaveType) -> EntryDraft {
    EntryDraft {
        date: date.to_string(),
        activity: Some(activity.to_string()),
        leave_type,
    }
}

fn policy() -> EntryPolicy {
    EntryPolicy {
        range: DateRange::new(d(1, 1), d(3, 29)).unwrap(),
        weekend_system: Some(WeekendSystem::SaturdaySunday),
    }
}

#[tokio::test]
async fn test_backup_then_import_roundtrip() {
    let dir = TempDir::new().unwrap();
    let owner = OwnerId::new("intern-1").unwrap();
    let source: Arc<dyn LogStore> = Arc::new(JsonFileStore::new(dir.path().join("a/logs.json")));
    let book = Logbook::new(source.clone(), owner.clone(), policy());

    book.add(&draft("2024-01-02", "Onboarding and access requests", LeaveType::Activity))
        .await
        .unwrap();
    book.add(&draft("2024-01-03", "Line one\r\nLine two of notes", LeaveType::Activity))
        .await
        .unwrap();
    book.add(&EntryDraft {
        date: "2024-01-04".to_string(),
        activity: None,
        leave_type: LeaveType::Mc,
    })
    .await
    .unwrap();

    let target = dir.path().join("backup/logs.json");
    let (path, count) = write_backup(source.as_ref(), &owner, Some(target.clone()), d(1, 5))
        .await
        .unwrap();
    assert_eq!(path, target);
    assert_eq!(count, 3);

    let backup: Vec<Value> =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(backup.len(), 3);
    assert!(backup.iter().all(|entry| entry.get("id").is_none()));
    assert_eq!(backup[0]["date"], "2024-01-04");
    assert_eq!(backup[0]["leaveType"], "mc");

    // Import into a fresh store for another owner
    let other = OwnerId::new("intern-2").unwrap();
    let destination = JsonFileStore::new(dir.path().join("b/logs.json"));
    let outcome = import_file(&destination, &other, &policy().range, &target)
        .await
        .unwrap();
    assert_eq!(outcome.imported, 3);
    assert_eq!(outcome.skipped, 0);

    let imported = destination.list_for_owner(&other).await.unwrap();
    let dates: Vec<&str> = imported.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-01-04", "2024-01-03", "2024-01-02"]);
    assert_eq!(imported[1].activity, "Line one\nLine two of notes");
    assert!(imported.iter().all(|r| r.user_id == other));
    assert!(imported.iter().all(|r| Some(r.created_at) == r.updated_at));

    let originals = source.list_for_owner(&owner).await.unwrap();
    assert!(imported.iter().all(|r| originals.iter().all(|o| o.id != r.id)));
}

#[tokio::test]
async fn test_import_skips_out_of_range_entries() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("import.json");
    std::fs::write(
        &file,
        r#"[
            {"date": "2023-12-29", "activity": "Before the internship"},
            {"date": "2024-02-14", "activity": "Integration testing", "leaveType": "activity"},
            {"date": "2024-04-01", "activity": "After the internship"},
            {"date": "2024-02-15", "activity": "Legacy entry", "leaveType": "sick-day"}
        ]"#,
    )
    .unwrap();

    let store = JsonFileStore::new(dir.path().join("logs.json"));
    let owner = OwnerId::new("intern-1").unwrap();
    let outcome = import_file(&store, &owner, &policy().range, &file).await.unwrap();

    assert_eq!(outcome.imported, 2);
    assert_eq!(outcome.skipped, 2);

    let records = store.list_for_owner(&owner).await.unwrap();
    assert_eq!(records.len(), 2);
    // unknown tag strings become "no tag"
    assert_eq!(records[0].leave_type, None);
    assert_eq!(records[1].leave_type, Some(LeaveType::Activity));
}

#[tokio::test]
async fn test_import_rejects_invalid_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("import.json");
    std::fs::write(&file, r#"{"logs": []}"#).unwrap();

    let store = JsonFileStore::new(dir.path().join("logs.json"));
    let owner = OwnerId::new("intern-1").unwrap();
    let err = import_file(&store, &owner, &policy().range, &file)
        .await
        .unwrap_err();

    assert!(matches!(err, LogbookError::Validation(_)));
    assert!(err.to_string().contains("Invalid file format"));
    assert!(!dir.path().join("logs.json").exists());
}

#[tokio::test]
async fn test_backup_with_no_entries() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("logs.json"));
    let owner = OwnerId::new("intern-1").unwrap();
    let target = dir.path().join(backup_file_name(d(2, 1)));

    let err = write_backup(&store, &owner, Some(target.clone()), d(2, 1))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("There are no logs to export"));
    assert!(!target.exists());
}

#[tokio::test]
async fn test_entries_persist_and_feed_progress() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logs.json");
    let owner = OwnerId::new("intern-1").unwrap();

    {
        let book = Logbook::new(Arc::new(JsonFileStore::new(&path)), owner.clone(), policy());
        book.add(&draft("2024-01-08", "Sprint planning meeting", LeaveType::Activity))
            .await
            .unwrap();
        book.add(&draft("2024-01-09", "Implemented the login page", LeaveType::Activity))
            .await
            .unwrap();

        // Saturday
        let err = book
            .add(&draft("2024-01-13", "Weekend hackathon", LeaveType::Activity))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Weekends are not allowed"));
    }

    // A second store on the same file sees the entries
    let store = JsonFileStore::new(&path);
    let records = store.list_for_owner(&owner).await.unwrap();
    assert_eq!(records.len(), 2);

    let report = ProgressReport::compute(
        &records,
        policy().range,
        Some(WeekendSystem::SaturdaySunday),
        d(1, 10),
    );
    assert_eq!(report.days_logged, 2);
    // 2024-01-01 .. 2024-03-29 holds 13 weeks of 5 working days
    assert_eq!(report.working_days, 65);
    assert_eq!(report.days_remaining, Some(79));
    // 2024-01-01 .. 2024-01-09 without the two logged days
    assert_eq!(report.missing_dates.len(), 7);
}
