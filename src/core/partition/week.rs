//! Week-number assignment relative to a reporting range

use crate::domain::{parse_calendar_date, DateRange, ExportError};
use chrono::{Datelike, Duration, NaiveDate};

/// Monday of the week containing `date`
pub fn week_anchor(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// 1-based week index of `target`, counted from the Monday on or before the range start
///
/// Dates before that Monday yield zero or negative weeks; they are not clamped.
///
/// # Errors
///
/// Returns [`ExportError::InvalidDate`] when a range bound is missing.
///
/// # Examples
///
/// ```
/// use logtrack::core::partition::week_number;
/// use logtrack::domain::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
/// ).unwrap();
/// let week = week_number(&range, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()).unwrap();
/// assert_eq!(week, 2);
/// ```
pub fn week_number(range: &DateRange, target: NaiveDate) -> Result<i64, ExportError> {
    let (start, _end) = range.bounds()?;
    let days = (target - week_anchor(start)).num_days();
    Ok(days.div_euclid(7) + 1)
}

/// Same as [`week_number`] for a stored `YYYY-MM-DD` string
pub fn week_number_for(range: &DateRange, target: &str) -> Result<i64, ExportError> {
    week_number(range, parse_calendar_date(target)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_anchor_is_monday() {
        assert_eq!(week_anchor(d(2024, 1, 3)), d(2024, 1, 1));
        assert_eq!(week_anchor(d(2024, 1, 1)), d(2024, 1, 1));
        assert_eq!(week_anchor(d(2024, 1, 7)), d(2024, 1, 1));
    }

    #[test]
    fn test_monday_start() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert_eq!(week_number(&range, d(2024, 1, 1)).unwrap(), 1);
        assert_eq!(week_number(&range, d(2024, 1, 7)).unwrap(), 1);
        assert_eq!(week_number(&range, d(2024, 1, 8)).unwrap(), 2);
        assert_eq!(week_number(&range, d(2024, 1, 31)).unwrap(), 5);
    }

    #[test]
    fn test_midweek_start_aligns_to_monday() {
        let range = DateRange::new(d(2024, 1, 3), d(2024, 1, 31)).unwrap();
        assert_eq!(week_number(&range, d(2024, 1, 1)).unwrap(), 1);
    }

    #[test]
    fn test_dates_before_anchor_are_not_clamped() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert_eq!(week_number(&range, d(2023, 12, 31)).unwrap(), 0);
        assert_eq!(week_number(&range, d(2023, 12, 25)).unwrap(), 0);
        assert_eq!(week_number(&range, d(2023, 12, 24)).unwrap(), -1);
    }

    #[test]
    fn test_missing_bound_is_invalid_date() {
        let range = DateRange::from_bounds(None, Some(d(2024, 1, 31)));
        assert!(matches!(
            week_number(&range, d(2024, 1, 8)),
            Err(ExportError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_malformed_target_is_invalid_date() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert!(matches!(
            week_number_for(&range, "2024-02-30"),
            Err(ExportError::InvalidDate(_))
        ));
        assert_eq!(week_number_for(&range, "2024-01-15").unwrap(), 3);
    }
}
