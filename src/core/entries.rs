//! Log entry management
//!
//! Validation rules applied to every new or edited entry:
//!
//! - the date is required and must be `YYYY-MM-DD`
//! - the activity must be at least [`MIN_ACTIVITY_CHARS`] characters
//! - the date must lie inside the internship period
//! - no other record of the owner may use the same date
//! - weekend dates are refused when a weekend system is configured
//!
//! Leave entries without an activity get their type's default text.

use crate::adapters::store::LogStore;
use crate::config::UserConfig;
use crate::domain::{
    parse_calendar_date, DateRange, LeaveType, LogRecord, LogbookError, OwnerId, RecordId,
    Result, WeekendSystem,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

/// Minimum length of an activity description
pub const MIN_ACTIVITY_CHARS: usize = 10;

/// Rules an entry must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPolicy {
    /// Internship period
    pub range: DateRange,
    /// Weekend days refused for logging, if any
    pub weekend_system: Option<WeekendSystem>,
}

impl EntryPolicy {
    /// Policy for the configured user
    pub fn from_user(user: &UserConfig) -> Self {
        Self {
            range: user.date_range(),
            weekend_system: user.weekend_system,
        }
    }
}

/// Unvalidated entry input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    /// Date as typed, `YYYY-MM-DD`
    pub date: String,
    /// Activity text; `None` falls back to the leave type's default text
    pub activity: Option<String>,
    /// Leave-type tag
    pub leave_type: LeaveType,
}

/// A draft that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEntry {
    /// Parsed date
    pub date: NaiveDate,
    /// Activity with line endings normalized
    pub activity: String,
    /// Leave-type tag
    pub leave_type: LeaveType,
}

/// Converts CRLF line endings to LF
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Validates `draft` against `policy` and the owner's `existing` records
///
/// `editing` names the record being edited so it does not clash with itself.
///
/// # Errors
///
/// Returns [`LogbookError::Validation`] naming the first broken rule.
pub fn validate_entry(
    draft: &EntryDraft,
    policy: &EntryPolicy,
    existing: &[LogRecord],
    editing: Option<&RecordId>,
) -> Result<ValidEntry> {
    if draft.date.trim().is_empty() {
        return Err(LogbookError::Validation("Date is required".to_string()));
    }
    let date = parse_calendar_date(&draft.date)
        .map_err(|e| LogbookError::Validation(e.to_string()))?;

    let activity = match &draft.activity {
        Some(text) => text.clone(),
        None => draft.leave_type.default_text().unwrap_or_default().to_string(),
    };
    if activity.chars().count() < MIN_ACTIVITY_CHARS {
        return Err(LogbookError::Validation(format!(
            "Activity description must be at least {MIN_ACTIVITY_CHARS} characters"
        )));
    }

    if !policy.range.contains(date) {
        return Err(LogbookError::Validation(
            "Date must be within the internship period.".to_string(),
        ));
    }

    let date_str = date.to_string();
    let duplicate = existing
        .iter()
        .any(|r| r.date == date_str && Some(&r.id) != editing);
    if duplicate {
        return Err(LogbookError::Validation(
            "A log for this date already exists".to_string(),
        ));
    }

    if policy.weekend_system.is_some_and(|w| w.is_weekend(date)) {
        return Err(LogbookError::Validation(
            "Weekends are not allowed for logging activities.".to_string(),
        ));
    }

    Ok(ValidEntry {
        date,
        activity: normalize_line_endings(&activity),
        leave_type: draft.leave_type,
    })
}

/// Add, edit, remove and list one owner's entries
pub struct Logbook {
    store: Arc<dyn LogStore>,
    owner: OwnerId,
    policy: EntryPolicy,
}

impl Logbook {
    /// Creates a logbook for `owner`
    pub fn new(store: Arc<dyn LogStore>, owner: OwnerId, policy: EntryPolicy) -> Self {
        Self {
            store,
            owner,
            policy,
        }
    }

    /// Owner of this logbook
    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Records, date descending
    pub async fn list(&self) -> Result<Vec<LogRecord>> {
        self.store.list_for_owner(&self.owner).await
    }

    /// Validates and stores a new entry
    ///
    /// # Errors
    ///
    /// Returns a validation error for a broken rule or a storage error.
    pub async fn add(&self, draft: &EntryDraft) -> Result<LogRecord> {
        let existing = self.list().await?;
        let entry = validate_entry(draft, &self.policy, &existing, None)?;

        let record = LogRecord::new(
            self.owner.clone(),
            entry.date,
            entry.activity,
            entry.leave_type,
        );
        self.store.insert(record.clone()).await?;

        tracing::info!(id = %record.id, date = %record.date, leave_type = %entry.leave_type, "Log added");
        Ok(record)
    }

    /// Replaces date, activity and tag of an existing entry
    ///
    /// The creation time is kept and the update time set to now.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the record does not exist, belongs to
    /// another owner, or the new values break a rule.
    pub async fn edit(&self, id: &RecordId, draft: &EntryDraft) -> Result<LogRecord> {
        let mut record = self.owned(id).await?;
        let existing = self.list().await?;
        let entry = validate_entry(draft, &self.policy, &existing, Some(id))?;

        record.date = entry.date.to_string();
        record.activity = entry.activity;
        record.leave_type = Some(entry.leave_type);
        record.updated_at = Some(Utc::now());
        self.store.update(record.clone()).await?;

        tracing::info!(id = %record.id, date = %record.date, "Log updated");
        Ok(record)
    }

    /// Deletes an entry
    ///
    /// # Errors
    ///
    /// Returns a validation error if the record does not exist or belongs to
    /// another owner.
    pub async fn remove(&self, id: &RecordId) -> Result<()> {
        self.owned(id).await?;
        self.store.delete(id).await?;
        tracing::info!(id = %id, "Log deleted");
        Ok(())
    }

    async fn owned(&self, id: &RecordId) -> Result<LogRecord> {
        match self.store.get(id).await? {
            Some(record) if record.user_id == self.owner => Ok(record),
            _ => Err(LogbookError::Validation(format!("No log entry with id {id}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::MemoryStore;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn policy(weekend_system: Option<WeekendSystem>) -> EntryPolicy {
        EntryPolicy {
            range: DateRange::new(d(2024, 1, 1), d(2024, 3, 31)).unwrap(),
            weekend_system,
        }
    }

    fn draft(date: &str, activity: Option<&str>, leave_type: LeaveType) -> EntryDraft {
        EntryDraft {
            date: date.to_string(),
            activity: activity.map(str::to_string),
            leave_type,
        }
    }

    fn logbook() -> Logbook {
        Logbook::new(
            Arc::new(MemoryStore::new()),
            OwnerId::new("u1").unwrap(),
            policy(Some(WeekendSystem::SaturdaySunday)),
        )
    }

    fn message(result: Result<ValidEntry>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_valid_entry_normalizes_line_endings() {
        let entry = validate_entry(
            &draft("2024-01-02", Some("Line one\r\nLine two"), LeaveType::Activity),
            &policy(None),
            &[],
            None,
        )
        .unwrap();
        assert_eq!(entry.activity, "Line one\nLine two");
        assert_eq!(entry.date, d(2024, 1, 2));
    }

    #[test]
    fn test_date_rules() {
        let p = policy(None);
        assert!(message(validate_entry(&draft("", Some("Long enough text"), LeaveType::Activity), &p, &[], None))
            .contains("Date is required"));
        assert!(message(validate_entry(&draft("02/01/2024", Some("Long enough text"), LeaveType::Activity), &p, &[], None))
            .contains("YYYY-MM-DD"));
        assert!(message(validate_entry(&draft("2024-04-01", Some("Long enough text"), LeaveType::Activity), &p, &[], None))
            .contains("internship period"));
    }

    #[test]
    fn test_range_must_be_complete() {
        let p = EntryPolicy {
            range: DateRange::from_bounds(Some(d(2024, 1, 1)), None),
            weekend_system: None,
        };
        let result = validate_entry(&draft("2024-01-02", Some("Long enough text"), LeaveType::Activity), &p, &[], None);
        assert!(message(result).contains("internship period"));
    }

    #[test]
    fn test_short_activity() {
        let result = validate_entry(&draft("2024-01-02", Some("too short"), LeaveType::Activity), &policy(None), &[], None);
        assert!(message(result).contains("at least 10 characters"));
    }

    #[test]
    fn test_leave_default_text() {
        let entry = validate_entry(&draft("2024-01-02", None, LeaveType::Mc), &policy(None), &[], None).unwrap();
        assert_eq!(Some(entry.activity.as_str()), LeaveType::Mc.default_text());
    }

    #[test]
    fn test_weekend_refused() {
        // 2024-01-06 is a Saturday, 2024-01-05 a Friday
        let sat_sun = policy(Some(WeekendSystem::SaturdaySunday));
        let result = validate_entry(&draft("2024-01-06", Some("Long enough text"), LeaveType::Activity), &sat_sun, &[], None);
        assert!(message(result).contains("Weekends are not allowed"));
        assert!(validate_entry(&draft("2024-01-05", Some("Long enough text"), LeaveType::Activity), &sat_sun, &[], None).is_ok());

        let fri_sat = policy(Some(WeekendSystem::FridaySaturday));
        assert!(validate_entry(&draft("2024-01-05", Some("Long enough text"), LeaveType::Activity), &fri_sat, &[], None).is_err());
    }

    #[tokio::test]
    async fn test_add_refuses_duplicate_date() {
        let book = logbook();
        book.add(&draft("2024-01-02", Some("Onboarding session"), LeaveType::Activity))
            .await
            .unwrap();
        let err = book
            .add(&draft("2024-01-02", Some("Second entry same day"), LeaveType::Activity))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_edit_keeps_created_at_and_own_date() {
        let book = logbook();
        let original = book
            .add(&draft("2024-01-02", Some("Onboarding session"), LeaveType::Activity))
            .await
            .unwrap();

        let edited = book
            .edit(&original.id, &draft("2024-01-02", Some("Onboarding and laptop setup"), LeaveType::Activity))
            .await
            .unwrap();

        assert_eq!(edited.created_at, original.created_at);
        assert!(edited.updated_at.is_some());
        assert_eq!(book.list().await.unwrap()[0].activity, "Onboarding and laptop setup");
    }

    #[tokio::test]
    async fn test_remove_unknown_id() {
        let book = logbook();
        let err = book.remove(&RecordId::new("missing").unwrap()).await.unwrap_err();
        assert!(matches!(err, LogbookError::Validation(_)));
    }

    #[tokio::test]
    async fn test_remove() {
        let book = logbook();
        let record = book
            .add(&draft("2024-01-03", Some("Database migration"), LeaveType::Activity))
            .await
            .unwrap();
        book.remove(&record.id).await.unwrap();
        assert!(book.list().await.unwrap().is_empty());
    }
}
