//! Calendar date type.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A calendar date.
///
/// Newtype over `chrono::NaiveDate`. Serialises as an ISO 8601 string.
///
/// # Example
///
/// ```rust
/// use bondcurve_core::Date;
///
/// let issue = Date::from_ymd(2022, 7, 20).unwrap();
/// let maturity = Date::parse("2032-07-17").unwrap();
/// assert!(maturity > issue);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses an ISO 8601 date (`YYYY-MM-DD`).
    ///
    /// A trailing time component (`2022-07-20T22:43:59.567602`) is accepted
    /// and dropped, matching the timestamps pricing requests carry.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
        Self::parse_with_format(date_part, "%Y-%m-%d")
    }

    /// Parses a date using an explicit `chrono` format string.
    pub fn parse_with_format(s: &str, format: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), format)
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse '{s}' as {format}")))
    }

    /// Returns today's date in local time.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of years, clamping Feb 29 to Feb 28 when needed.
    pub fn add_years(&self, years: i32) -> CoreResult<Self> {
        let year = self.year() + years;
        let day = if self.month() == 2 && self.day() == 29 && !is_leap_year(year) {
            28
        } else {
            self.day()
        };
        Self::from_ymd(year, self.month(), day)
    }

    /// Number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
