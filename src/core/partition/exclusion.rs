//! Exclusion filter
//!
//! A record is dropped when its leave-type tag matches an enabled category,
//! or when its activity text contains that category's keyword. The keyword
//! check catches older records that were saved without a tag.

use crate::domain::{LeaveType, LogRecord};
use serde::{Deserialize, Serialize};

/// User-selected categories to leave out of an export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionOptions {
    /// Drop public holidays
    #[serde(default)]
    pub exclude_public_holidays: bool,

    /// Drop medical leave
    #[serde(default)]
    pub exclude_mc: bool,

    /// Drop annual leave
    #[serde(default)]
    pub exclude_annual_leave: bool,

    /// Drop emergency leave
    #[serde(default)]
    pub exclude_emergency_leave: bool,
}

impl ExclusionOptions {
    /// Leave types whose flag is set
    pub fn excluded_types(&self) -> impl Iterator<Item = LeaveType> {
        [
            (self.exclude_public_holidays, LeaveType::Holiday),
            (self.exclude_mc, LeaveType::Mc),
            (self.exclude_annual_leave, LeaveType::Annual),
            (self.exclude_emergency_leave, LeaveType::Emergency),
        ]
        .into_iter()
        .filter_map(|(enabled, leave_type)| enabled.then_some(leave_type))
    }

    /// Number of enabled exclusions
    pub fn active_count(&self) -> usize {
        self.excluded_types().count()
    }
}

/// Returns true if `record` must be left out of the export
pub fn should_exclude(record: &LogRecord, options: &ExclusionOptions) -> bool {
    let activity = record.activity.to_lowercase();
    options.excluded_types().any(|leave_type| {
        record.leave_type == Some(leave_type)
            || leave_type
                .keyword()
                .is_some_and(|keyword| activity.contains(keyword))
    })
}

/// Keeps the records that survive the exclusion filter, in source order
pub fn filter_records<'a>(
    records: &'a [LogRecord],
    options: &ExclusionOptions,
) -> Vec<&'a LogRecord> {
    records
        .iter()
        .filter(|record| !should_exclude(record, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OwnerId;
    use chrono::NaiveDate;

    fn record(activity: &str, leave_type: Option<LeaveType>) -> LogRecord {
        let mut r = LogRecord::new(
            OwnerId::new("u1").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            activity,
            LeaveType::Activity,
        );
        r.leave_type = leave_type;
        r
    }

    #[test]
    fn test_no_flags_keeps_everything() {
        let r = record("On holiday", Some(LeaveType::Holiday));
        assert!(!should_exclude(&r, &ExclusionOptions::default()));
    }

    #[test]
    fn test_tag_match() {
        let options = ExclusionOptions {
            exclude_annual_leave: true,
            ..Default::default()
        };
        let r = record("Away", Some(LeaveType::Annual));
        assert!(should_exclude(&r, &options));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let options = ExclusionOptions {
            exclude_public_holidays: true,
            ..Default::default()
        };
        let r = record("National HOLIDAY", None);
        assert!(should_exclude(&r, &options));
    }

    #[test]
    fn test_mc_keyword_matches_substrings() {
        let options = ExclusionOptions {
            exclude_mc: true,
            ..Default::default()
        };
        // the keyword check is a plain substring test
        let r = record("Deployed to AMCS cluster", Some(LeaveType::Activity));
        assert!(should_exclude(&r, &options));
    }

    #[test]
    fn test_other_category_not_excluded() {
        let options = ExclusionOptions {
            exclude_emergency_leave: true,
            ..Default::default()
        };
        let r = record("Annual planning meeting", Some(LeaveType::Activity));
        assert!(!should_exclude(&r, &options));
    }

    #[test]
    fn test_activity_tag_never_excluded_by_tag() {
        let options = ExclusionOptions {
            exclude_public_holidays: true,
            exclude_mc: true,
            exclude_annual_leave: true,
            exclude_emergency_leave: true,
        };
        let r = record("Wrote the report", Some(LeaveType::Activity));
        assert!(!should_exclude(&r, &options));
        assert_eq!(options.active_count(), 4);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let options = ExclusionOptions {
            exclude_public_holidays: true,
            ..Default::default()
        };
        let records = vec![
            record("Holiday", Some(LeaveType::Holiday)),
            record("Code review", Some(LeaveType::Activity)),
            record("holiday trip", None),
        ];
        let once: Vec<LogRecord> = filter_records(&records, &options)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<LogRecord> = filter_records(&once, &options)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
    }
}
