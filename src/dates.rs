use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};

use crate::error::AppError;

pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Returned by [`format_date`] when the input cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Parses a `YYYY-MM-DD` string.
pub fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s.trim(), ISO_FORMAT).map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Shifts `date` by `n` calendar days; negative `n` goes backwards.
pub fn add_days(date: NaiveDate, n: i64) -> Result<NaiveDate, AppError> {
    Duration::try_days(n)
        .and_then(|d| date.checked_add_signed(d))
        .ok_or_else(|| AppError::DateOutOfRange(date.to_string(), n))
}

/// String form of [`add_days`]: `add_days_to_date("2024-02-28", 1) == "2024-02-29"`.
pub fn add_days_to_date(date: &str, n: i64) -> Result<String, AppError> {
    let d = parse_date(date)?;
    Ok(add_days(d, n)?.format(ISO_FORMAT).to_string())
}

/// Absolute number of calendar days between two dates.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> u64 {
    (b - a).num_days().unsigned_abs()
}

/// String form of [`days_between`]. Symmetric in its arguments.
pub fn get_days_difference(a: &str, b: &str) -> Result<u64, AppError> {
    Ok(days_between(parse_date(a)?, parse_date(b)?))
}

/// Today's local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Today's local calendar day as `YYYY-MM-DD`.
pub fn get_today_string() -> String {
    today().format(ISO_FORMAT).to_string()
}

/// Renders a date as e.g. `Mon, 15 Jan`.
///
/// Accepts plain dates, naive ISO datetimes and RFC 3339 timestamps. Never
/// fails: unparsable input yields [`INVALID_DATE`].
pub fn format_date(s: &str) -> String {
    match parse_loose(s.trim()) {
        Some(d) => d.format("%a, %-d %b").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_loose(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, ISO_FORMAT) {
        return Some(d);
    }
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Local).date_naive())
}
