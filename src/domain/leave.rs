//! Leave-type tags and weekend systems

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a log record
///
/// Wire values are `activity`, `holiday`, `mc`, `annual` and `emergency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    /// Regular internship activity
    Activity,
    /// Public holiday
    Holiday,
    /// Medical leave (medical certificate)
    Mc,
    /// Annual leave
    Annual,
    /// Emergency leave
    Emergency,
}

impl LeaveType {
    /// All leave types in display order
    pub const ALL: [LeaveType; 5] = [
        LeaveType::Activity,
        LeaveType::Holiday,
        LeaveType::Mc,
        LeaveType::Annual,
        LeaveType::Emergency,
    ];

    /// Wire value of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Activity => "activity",
            LeaveType::Holiday => "holiday",
            LeaveType::Mc => "mc",
            LeaveType::Annual => "annual",
            LeaveType::Emergency => "emergency",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Activity => "Regular Activity",
            LeaveType::Holiday => "Public Holiday",
            LeaveType::Mc => "Medical Certificate (MC)",
            LeaveType::Annual => "Annual Leave",
            LeaveType::Emergency => "Emergency Leave",
        }
    }

    /// Text pre-filled for leave entries when no activity is supplied
    pub fn default_text(&self) -> Option<&'static str> {
        match self {
            LeaveType::Activity => None,
            LeaveType::Holiday => Some(
                "On leave due to the public holiday, [Specify Holiday Name, e.g., 'National Day']. \n\n[Add any additional notes or reasons if required]",
            ),
            LeaveType::Mc => Some(
                "On medical leave as per the attached Medical Certificate. \n\n[Specify reason if required, e.g., 'flu symptoms']",
            ),
            LeaveType::Annual => Some(
                "On annual leave as approved by supervisor. \n\n[Optional: Add reasons if relevant]",
            ),
            LeaveType::Emergency => Some(
                "On emergency leave due to urgent personal matters. \n\n[Specify reason, e.g., 'family emergency']",
            ),
        }
    }

    /// Keyword matched against free text for untagged records
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            LeaveType::Activity => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeaveType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("Unknown leave type '{s}'. Expected one of: activity, holiday, mc, annual, emergency")
            })
    }
}

/// Deserializes an optional tag, mapping unknown strings to `None`
///
/// Older records carry no tag or free-form values; those are treated as untagged.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<LeaveType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| LeaveType::from_str(&s).ok()))
}

/// Which two weekdays form the weekend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekendSystem {
    /// Friday and Saturday
    FridaySaturday,
    /// Saturday and Sunday
    SaturdaySunday,
}

impl WeekendSystem {
    /// Returns true when `date` falls on this system's weekend
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        let day = date.weekday();
        match self {
            WeekendSystem::FridaySaturday => matches!(day, Weekday::Fri | Weekday::Sat),
            WeekendSystem::SaturdaySunday => matches!(day, Weekday::Sat | Weekday::Sun),
        }
    }
}

impl fmt::Display for WeekendSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekendSystem::FridaySaturday => f.write_str("friday-saturday"),
            WeekendSystem::SaturdaySunday => f.write_str("saturday-sunday"),
        }
    }
}
