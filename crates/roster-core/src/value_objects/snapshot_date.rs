//! Snapshot date - the calendar day a member snapshot belongs to
//!
//! Dates are timezone-naive and always rendered as `YYYY-MM-DD`, so the
//! string form sorts the same way the date does.

use chrono::{Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire and storage format for snapshot dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar day of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotDate(NaiveDate);

impl SnapshotDate {
    /// Wrap a chrono date
    #[inline]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year, month and day; `None` when the date does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date in UTC
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Get the inner chrono date
    #[inline]
    pub const fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Parse from `YYYY-MM-DD`
    pub fn parse(s: &str) -> Result<Self, SnapshotDateParseError> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| SnapshotDateParseError::InvalidFormat(s.to_string()))
    }

    /// The calendar day before, `None` at the lower bound of the calendar
    pub fn prev_day(self) -> Option<Self> {
        self.0.checked_sub_days(Days::new(1)).map(Self)
    }

    /// The calendar day after, `None` at the upper bound of the calendar
    pub fn next_day(self) -> Option<Self> {
        self.0.checked_add_days(Days::new(1)).map(Self)
    }

    /// Days elapsed since the Monday of this date's week (Monday = 0, Sunday = 6)
    pub fn days_since_monday(self) -> u32 {
        match self.0.weekday().num_days_from_sunday() {
            0 => 6,
            dow => dow - 1,
        }
    }

    /// Monday of the week containing this date
    pub fn week_start(self) -> Self {
        self.0
            .checked_sub_days(Days::new(u64::from(self.days_since_monday())))
            .map_or(self, Self)
    }
}

impl fmt::Display for SnapshotDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for SnapshotDate {
    type Err = SnapshotDateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for SnapshotDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<SnapshotDate> for NaiveDate {
    fn from(date: SnapshotDate) -> Self {
        date.0
    }
}

/// Error when parsing a snapshot date from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotDateParseError {
    #[error("invalid date (expected YYYY-MM-DD): {0}")]
    InvalidFormat(String),
}
