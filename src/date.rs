//! Calendar dates, date ranges and the date-to-pixel mapping.
//!
//! Every date is a plain calendar day. When a day has to become a point in
//! time it is anchored at 12:00 UTC so that no timezone or daylight-saving
//! shift can move it onto a neighbouring day.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LayoutError;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());

const NOON_HOUR: u32 = 12;
const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;
pub const MS_PER_JULIAN_YEAR: f64 = 365.25 * MS_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn parse(value: &str) -> Result<Self, LayoutError> {
        let invalid = || LayoutError::InvalidDate {
            value: value.to_string(),
        };
        let caps = ISO_DATE_RE.captures(value.trim()).ok_or_else(invalid)?;
        let year: i32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u32 = caps[2].parse().map_err(|_| invalid())?;
        let day: u32 = caps[3].parse().map_err(|_| invalid())?;
        Self::from_ymd(year, month, day).ok_or_else(invalid)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Milliseconds since the Unix epoch at noon UTC of this day.
    pub fn timestamp_ms(&self) -> f64 {
        self.0
            .and_hms_opt(NOON_HOUR, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis() as f64)
            .unwrap_or(f64::NAN)
    }

    pub fn first_of_month(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Calendar month arithmetic; the day is clamped to the target month's end.
    pub fn add_months(&self, months: i32) -> Option<Self> {
        let delta = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.0.checked_add_months(delta)
        } else {
            self.0.checked_sub_months(delta)
        };
        shifted.map(Self)
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl DateRange {
    pub fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start, end }
    }

    /// `[start_year-01-01, end_year-01-01]`.
    pub fn from_years(start_year: i32, end_year: i32) -> Option<Self> {
        Some(Self {
            start: CalendarDate::from_ymd(start_year, 1, 1)?,
            end: CalendarDate::from_ymd(end_year, 1, 1)?,
        })
    }

    /// Earliest date minus `padding_months` through latest date plus
    /// `padding_months`. `None` when `dates` is empty.
    pub fn around(dates: &[CalendarDate], padding_months: u32) -> Option<Self> {
        let min = dates.iter().min()?;
        let max = dates.iter().max()?;
        let pad = padding_months as i32;
        Some(Self {
            start: min.add_months(-pad).unwrap_or(*min),
            end: max.add_months(pad).unwrap_or(*max),
        })
    }

    /// An explicit override only applies when both years are given.
    pub fn resolve(
        start_year: Option<i32>,
        end_year: Option<i32>,
        dates: &[CalendarDate],
        padding_months: u32,
    ) -> Option<Self> {
        if let (Some(start), Some(end)) = (start_year, end_year)
            && let Some(range) = Self::from_years(start, end)
        {
            return Some(range);
        }
        Self::around(dates, padding_months)
    }

    pub fn duration_ms(&self) -> f64 {
        self.end.timestamp_ms() - self.start.timestamp_ms()
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let duration = self.duration_ms();
        if duration.is_finite() && duration > 0.0 {
            Ok(())
        } else {
            Err(LayoutError::DegenerateRange {
                start: self.start.to_string(),
                end: self.end.to_string(),
            })
        }
    }

    /// Fraction of the range elapsed at `date`. Dates outside the range
    /// extrapolate past `[0, 1]`.
    pub fn progress(&self, date: CalendarDate) -> f64 {
        (date.timestamp_ms() - self.start.timestamp_ms()) / self.duration_ms()
    }
}

/// Maps `date` onto an axis of `axis_length` pixels with `margin` reserved at
/// both ends. Callers must have validated `range`.
pub fn position(date: CalendarDate, range: &DateRange, axis_length: f64, margin: f64) -> f64 {
    margin + range.progress(date) * (axis_length - 2.0 * margin)
}

/// `"2024-03-15"` -> `"March 15, 2024"`. Empty input formats to an empty
/// string; anything unparseable is returned unchanged.
pub fn format_date(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    match CalendarDate::parse(value) {
        Ok(date) => date.naive().format("%B %-d, %Y").to_string(),
        Err(_) => value.to_string(),
    }
}

/// Abbreviated month and two-digit year, e.g. `"Mar 24"`.
pub fn format_month_label(date: CalendarDate) -> String {
    date.naive().format("%b %y").to_string()
}
