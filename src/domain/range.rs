//! Reporting date range

use crate::domain::errors::ExportError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used for every calendar date in logtrack
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar date
///
/// RFC 3339 timestamps are accepted too; only their date part is kept.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, ExportError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ExportError::InvalidDate("date is missing".to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .or_else(|_| {
            chrono::DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive())
        })
        .map_err(|_| ExportError::InvalidDate(format!("'{trimmed}' is not a valid YYYY-MM-DD date")))
}

/// Inclusive reporting period
///
/// Both bounds are optional so that an unconfigured range can be represented;
/// operations that need both report [`ExportError::InvalidDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the period
    pub start: Option<NaiveDate>,
    /// Last day of the period
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range with both bounds present
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ExportError> {
        if start > end {
            return Err(ExportError::InvalidDate(format!(
                "range start {start} is after range end {end}"
            )));
        }
        Ok(Self {
            start: Some(start),
            end: Some(end),
        })
    }

    /// Creates a range from possibly missing bounds, without ordering checks
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Returns both bounds or an error naming the missing one
    pub fn bounds(&self) -> Result<(NaiveDate, NaiveDate), ExportError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Ok((start, end)),
            (None, _) => Err(ExportError::InvalidDate(
                "date range start is missing".to_string(),
            )),
            (_, None) => Err(ExportError::InvalidDate(
                "date range end is missing".to_string(),
            )),
        }
    }

    /// Returns true if both bounds are set
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Returns true unless `date` lies outside a bound that is present
    pub fn admits(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    /// Returns true if both bounds are present and `date` lies between them
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.is_complete() && self.admits(date)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |d: Option<NaiveDate>| d.map_or("N/A".to_string(), |d| d.to_string());
        write!(f, "{} .. {}", show(self.start), show(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_calendar_date() {
        assert_eq!(parse_calendar_date("2024-01-08").unwrap(), d(2024, 1, 8));
        assert_eq!(
            parse_calendar_date("2024-01-08T10:00:00Z").unwrap(),
            d(2024, 1, 8)
        );
        assert!(matches!(
            parse_calendar_date("2024-13-01"),
            Err(ExportError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_calendar_date(""),
            Err(ExportError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        assert!(DateRange::new(d(2024, 2, 1), d(2024, 1, 1)).is_err());
        assert!(DateRange::new(d(2024, 1, 1), d(2024, 1, 1)).is_ok());
    }

    #[test]
    fn test_bounds_missing() {
        let range = DateRange::from_bounds(Some(d(2024, 1, 1)), None);
        assert!(range.bounds().is_err());
        assert!(!range.is_complete());
    }

    #[test]
    fn test_admits_and_contains() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert!(range.contains(d(2024, 1, 1)));
        assert!(range.contains(d(2024, 1, 31)));
        assert!(!range.contains(d(2024, 2, 1)));

        let open = DateRange::from_bounds(Some(d(2024, 1, 1)), None);
        assert!(open.admits(d(2030, 1, 1)));
        assert!(!open.admits(d(2023, 12, 31)));
        assert!(!open.contains(d(2024, 1, 2)));
    }
}
