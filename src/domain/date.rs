//! Calendar date helpers
//!
//! Everything here works on plain calendar days (`NaiveDate`); there is no
//! time-of-day or timezone involved. All functions are pure.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format used for day-bucket keys and persisted task dates
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Earliest year accepted from input and reachable by navigation
pub const MIN_YEAR: i32 = 1;

/// Latest year accepted from input and reachable by navigation
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Error, PartialEq)]
pub enum DateError {
    #[error("Invalid date: expected 'YYYY-MM-DD', got '{0}'")]
    InvalidDate(String),

    #[error("Invalid month: expected 'YYYY-MM', got '{0}'")]
    InvalidMonth(String),

    #[error("Date out of range: {0} (years {MIN_YEAR} to {MAX_YEAR} are supported)")]
    OutOfRange(String),
}

/// First day of the displayed week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

/// Returns the first day of `date`'s month
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

/// Returns the last day of `date`'s month
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = match date.month() {
        12 => (date.year() + 1, 1),
        m => (date.year(), m + 1),
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// True if `date` falls within `MIN_YEAR..=MAX_YEAR`
fn is_supported(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

/// Pulls `date` back into the supported years
pub fn clamp_supported(date: NaiveDate) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN);
    let last = NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).unwrap_or(NaiveDate::MAX);
    date.clamp(first, last)
}

/// Moves `date` by `days`, stopping at the edge of the supported years
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = Duration::try_days(days).and_then(|d| date.checked_add_signed(d));
    clamp_supported(shifted.unwrap_or(if days < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    }))
}

/// True if both values fall on the same calendar day
pub fn is_same_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Formats a date as `YYYY-MM-DD`
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` string into a local calendar date
pub fn from_iso_date(s: &str) -> Result<NaiveDate, DateError> {
    let date = NaiveDate::parse_from_str(s.trim(), ISO_DATE_FORMAT)
        .map_err(|_| DateError::InvalidDate(s.to_string()))?;
    supported(date, s)
}

fn supported(date: NaiveDate, input: &str) -> Result<NaiveDate, DateError> {
    if is_supported(date) {
        Ok(date)
    } else {
        Err(DateError::OutOfRange(input.trim().to_string()))
    }
}

/// Moves `n` months forward (or back for negative `n`), landing on day 1
///
/// Normalizing to the first of the month sidesteps "Jan 31 + 1 month".
/// The result never leaves the supported years.
pub fn add_months(date: NaiveDate, n: i32) -> NaiveDate {
    let index = (date.year() * 12 + date.month0() as i32)
        .saturating_add(n)
        .clamp(MIN_YEAR * 12, MAX_YEAR * 12 + 11);
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_else(|| start_of_month(date))
}

/// Number of days between the week start and `date`'s weekday (0..=6)
pub fn weekday_offset(date: NaiveDate, week_start: WeekStart) -> u32 {
    let day = date.weekday().num_days_from_sunday();
    let start = week_start.weekday().num_days_from_sunday();
    (day + 7 - start) % 7
}

/// Short weekday names in display order
pub fn weekday_headers(week_start: WeekStart) -> [&'static str; 7] {
    const SUNDAY_FIRST: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    let shift = week_start.weekday().num_days_from_sunday() as usize;
    std::array::from_fn(|i| SUNDAY_FIRST[(i + shift) % 7])
}

/// Human-readable month heading, e.g. "October 2026"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a `YYYY-MM` month reference into the first day of that month
pub fn parse_month(s: &str) -> Result<NaiveDate, DateError> {
    let s = s.trim();
    let month = NaiveDate::parse_from_str(&format!("{}-01", s), ISO_DATE_FORMAT)
        .map_err(|_| DateError::InvalidMonth(s.to_string()))?;
    supported(month, s)
}

/// Parses a day reference relative to `today`
///
/// Accepts `today`, `tomorrow`, `yesterday` or an ISO date.
pub fn parse_day(s: &str, today: NaiveDate) -> Result<NaiveDate, DateError> {
    match s.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => Ok(shift_days(today, 1)),
        "yesterday" => Ok(shift_days(today, -1)),
        _ => from_iso_date(s),
    }
}
