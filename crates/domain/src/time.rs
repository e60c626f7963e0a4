//! Time helpers and date normalization.
//!
//! Booking dates arrive from forms and API clients in a handful of shapes.
//! [`normalize_date`] folds all of them into a [`NaiveDate`], and
//! [`format_date`] renders the canonical `YYYY-MM-DD` form used in storage.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for `created_at` and similar bookkeeping fields.
pub type Timestamp = DateTime<Utc>;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];
/// `%Y` accepts one to four digits; anything before this is a truncated year.
const MIN_YEAR: i32 = 1000;
const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse a loosely formatted date string.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `DD-MM-YYYY`, `DD/MM/YYYY` and full
/// RFC 3339 timestamps (the UTC calendar date is kept). The year must have
/// four digits.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] when no format matches.
pub fn normalize_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();

    if let Some(date) = DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .find(|date| date.year() >= MIN_YEAR)
    {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|ts| ts.to_utc().date_naive())
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

/// Render a date in canonical `YYYY-MM-DD` form.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse an `HH:MM` or `HH:MM:SS` time of day.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTime`] when no format matches.
pub fn parse_time(input: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = input.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ValidationError::InvalidTime(input.to_string()))
}
