//! Weekly export partitioner
//!
//! Turns a flat list of log records into one payload per week:
//!
//! 1. drop records matching the [`ExclusionOptions`]
//! 2. assign every surviving record a week number relative to the range start
//! 3. group records by week, weeks ascending, rows in source order
//!
//! The partitioner is pure: no I/O and no state outside the call.

pub mod exclusion;
pub mod week;

pub use exclusion::{filter_records, should_exclude, ExclusionOptions};
pub use week::{week_anchor, week_number, week_number_for};

use crate::domain::{DateRange, ExportError, LogRecord};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Placeholder name of the week number in rendered documents
pub const WEEK_KEY: &str = "week";

/// Placeholder name of the activity rows loop in rendered documents
pub const ROWS_KEY: &str = "activity_row";

/// One `(date, activity)` line of a weekly document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRow {
    /// Record date as stored, `YYYY-MM-DD`
    pub date: String,
    /// Activity text
    pub activities: String,
}

/// Everything one weekly document is rendered from
#[derive(Debug, Clone, PartialEq)]
pub struct WeekPayload {
    /// 1-based week number relative to the range start
    pub week: i64,
    /// Caller-supplied identifying fields
    pub fields: BTreeMap<String, String>,
    /// Activity rows of this week
    pub rows: Vec<ActivityRow>,
}

impl WeekPayload {
    /// Flattens the payload into the map handed to the template renderer
    ///
    /// Static fields come first; `week` and `activity_row` override any
    /// static field of the same name.
    pub fn to_data_map(&self) -> Map<String, Value> {
        let mut data: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        data.insert(WEEK_KEY.to_string(), Value::String(self.week.to_string()));
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut m = Map::new();
                m.insert("date".to_string(), Value::String(row.date.clone()));
                m.insert(
                    "activities".to_string(),
                    Value::String(row.activities.clone()),
                );
                Value::Object(m)
            })
            .collect();
        data.insert(ROWS_KEY.to_string(), Value::Array(rows));
        data
    }

    /// Archive entry name, `logbook_<student_id>_week<week>.<ext>`
    pub fn document_name(&self, extension: &str) -> String {
        let student_id = self
            .fields
            .get("student_id")
            .map(String::as_str)
            .unwrap_or("unknown");
        format!("logbook_{student_id}_week{}.{extension}", self.week)
    }
}

/// Result of partitioning a record collection
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// Weekly payloads, week ascending
    pub weeks: Vec<WeekPayload>,
    /// Records handed in
    pub considered: usize,
    /// Records dropped by the exclusion filter
    pub excluded: usize,
}

impl Partition {
    /// Number of records that made it into a payload
    pub fn included(&self) -> usize {
        self.considered - self.excluded
    }
}

/// Filters, numbers and groups `records` into weekly payloads
///
/// # Errors
///
/// - [`ExportError::EmptyResult`] when no record survives the filter
/// - [`ExportError::InvalidDate`] when a range bound is missing or a
///   surviving record's date is malformed
pub fn partition(
    records: &[LogRecord],
    options: &ExclusionOptions,
    range: &DateRange,
    fields: &BTreeMap<String, String>,
) -> Result<Partition, ExportError> {
    let surviving = filter_records(records, options);
    let excluded = records.len() - surviving.len();

    if surviving.is_empty() {
        tracing::warn!(
            considered = records.len(),
            excluded = excluded,
            "No records left to export"
        );
        return Err(ExportError::EmptyResult);
    }

    let mut by_week: BTreeMap<i64, WeekPayload> = BTreeMap::new();
    for record in surviving {
        let week = week_number_for(range, &record.date).map_err(|e| match e {
            ExportError::InvalidDate(msg) => {
                ExportError::InvalidDate(format!("record {}: {msg}", record.id))
            }
            other => other,
        })?;

        by_week
            .entry(week)
            .or_insert_with(|| WeekPayload {
                week,
                fields: fields.clone(),
                rows: Vec::new(),
            })
            .rows
            .push(ActivityRow {
                date: record.date.clone(),
                activities: record.activity.clone(),
            });
    }

    tracing::debug!(
        considered = records.len(),
        excluded = excluded,
        weeks = by_week.len(),
        "Partitioned records by week"
    );

    Ok(Partition {
        weeks: by_week.into_values().collect(),
        considered: records.len(),
        excluded,
    })
}
