//! Internship progress statistics

use crate::domain::{DateRange, LogRecord, WeekendSystem};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Snapshot of how far the logbook has come
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    /// Internship period
    pub range: DateRange,
    /// Days from today until the end date; `None` without an end date
    pub days_remaining: Option<i64>,
    /// Distinct dates with at least one record
    pub days_logged: usize,
    /// Total number of records
    pub records: usize,
    /// Days in the period that are not weekend days
    pub working_days: usize,
    /// `records / working_days` as a percentage, capped at 100
    pub completion_percent: f64,
    /// Past dates in the period without a record
    pub missing_dates: Vec<NaiveDate>,
}

impl ProgressReport {
    /// Computes the report as of `today`
    pub fn compute(
        records: &[LogRecord],
        range: DateRange,
        weekend_system: Option<WeekendSystem>,
        today: NaiveDate,
    ) -> Self {
        let logged: BTreeSet<NaiveDate> = records
            .iter()
            .filter_map(|r| r.calendar_date().ok())
            .collect();

        let working_days = working_days(&range, weekend_system);
        let completion_percent = if working_days == 0 {
            0.0
        } else {
            (records.len() as f64 / working_days as f64 * 100.0).min(100.0)
        };

        Self {
            range,
            days_remaining: range.end.map(|end| (end - today).num_days()),
            days_logged: logged.len(),
            records: records.len(),
            working_days,
            completion_percent,
            missing_dates: missing_dates(&range, &logged, today),
        }
    }

    /// True once the end date has been reached
    pub fn is_complete(&self) -> bool {
        self.days_remaining.is_some_and(|days| days <= 0)
    }
}

/// Days in the range that are not weekend days; every day counts without a weekend system
///
/// Zero when either bound is missing.
pub fn working_days(range: &DateRange, weekend_system: Option<WeekendSystem>) -> usize {
    let Ok((start, end)) = range.bounds() else {
        return 0;
    };
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !weekend_system.is_some_and(|w| w.is_weekend(*day)))
        .count()
}

/// Dates from the range start up to, but excluding, the earlier of the end date and today
fn missing_dates(
    range: &DateRange,
    logged: &BTreeSet<NaiveDate>,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let Some(start) = range.start else {
        return Vec::new();
    };
    let cutoff = range.end.map_or(today, |end| end.min(today));
    start
        .iter_days()
        .take_while(|day| *day < cutoff)
        .filter(|day| !logged.contains(day))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LeaveType, OwnerId};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rec(date: NaiveDate) -> LogRecord {
        LogRecord::new(OwnerId::new("u1").unwrap(), date, "Did some work", LeaveType::Activity)
    }

    #[test]
    fn test_working_days_per_weekend_system() {
        // 2024-01-01 (Mon) .. 2024-01-14 (Sun)
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 14)).unwrap();
        assert_eq!(working_days(&range, Some(WeekendSystem::SaturdaySunday)), 10);
        assert_eq!(working_days(&range, Some(WeekendSystem::FridaySaturday)), 10);
        assert_eq!(working_days(&range, None), 14);

        // Mon .. Fri: Friday only counts under saturday-sunday
        let week = DateRange::new(d(2024, 1, 1), d(2024, 1, 5)).unwrap();
        assert_eq!(working_days(&week, Some(WeekendSystem::SaturdaySunday)), 5);
        assert_eq!(working_days(&week, Some(WeekendSystem::FridaySaturday)), 4);
    }

    #[test]
    fn test_working_days_missing_bound() {
        let range = DateRange::from_bounds(Some(d(2024, 1, 1)), None);
        assert_eq!(working_days(&range, None), 0);
    }

    #[test]
    fn test_report() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let records = vec![rec(d(2024, 1, 1)), rec(d(2024, 1, 3)), rec(d(2024, 1, 3))];
        let report = ProgressReport::compute(
            &records,
            range,
            Some(WeekendSystem::SaturdaySunday),
            d(2024, 1, 5),
        );

        assert_eq!(report.days_remaining, Some(26));
        assert_eq!(report.days_logged, 2);
        assert_eq!(report.records, 3);
        assert_eq!(report.working_days, 23);
        assert!((report.completion_percent - 3.0 / 23.0 * 100.0).abs() < 1e-9);
        assert_eq!(report.missing_dates, vec![d(2024, 1, 2), d(2024, 1, 4)]);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_completion_is_capped() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 1)).unwrap();
        let records = vec![rec(d(2024, 1, 1)), rec(d(2024, 1, 1))];
        let report = ProgressReport::compute(&records, range, None, d(2024, 2, 1));
        assert_eq!(report.completion_percent, 100.0);
        assert!(report.is_complete());
        assert!(report.missing_dates.is_empty());
    }

    #[test]
    fn test_missing_dates_stop_at_end() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 4)).unwrap();
        let report = ProgressReport::compute(&[], range, None, d(2024, 3, 1));
        assert_eq!(
            report.missing_dates,
            vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]
        );
    }
}
