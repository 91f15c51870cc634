//! Log record domain model

use super::errors::ExportError;
use super::ids::{OwnerId, RecordId};
use super::leave::{self, LeaveType};
use super::range::parse_calendar_date;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day's entry in the logbook
///
/// The date is kept as the stored `YYYY-MM-DD` string; [`LogRecord::calendar_date`]
/// parses it on demand so malformed stored dates surface at export time.
/// Field names serialize in camelCase to stay compatible with existing backups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Unique record identifier
    pub id: RecordId,

    /// Owner of the record
    pub user_id: OwnerId,

    /// Calendar date, `YYYY-MM-DD`
    pub date: String,

    /// Free-text activity description
    pub activity: String,

    /// Leave-type tag, absent on older records
    #[serde(
        default,
        deserialize_with = "leave::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub leave_type: Option<LeaveType>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LogRecord {
    /// Creates a new record with a generated id and the current time
    pub fn new(
        user_id: OwnerId,
        date: NaiveDate,
        activity: impl Into<String>,
        leave_type: LeaveType,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            user_id,
            date: date.to_string(),
            activity: activity.into(),
            leave_type: Some(leave_type),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Parses the record's calendar date
    pub fn calendar_date(&self) -> Result<NaiveDate, ExportError> {
        parse_calendar_date(&self.date)
    }
}
