//! Locale-independent calendar date parsing

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use docket_domain::CalendarDate;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a date or timestamp string into a calendar date
///
/// Accepts ISO dates, ISO timestamps with a space or `T` separator (optional
/// fractional seconds), RFC 3339 with an offset, `YYYY/MM/DD` and
/// `MM/DD/YYYY`. Time-of-day is discarded. The process locale is never
/// consulted.
///
/// # Examples
///
/// ```
/// use docket_gatekeeper::parse_calendar_date;
///
/// let date = parse_calendar_date("2013-08-13 06:03:42").unwrap();
/// assert_eq!((date.year(), date.month(), date.day()), (2013, 8, 13));
/// assert!(parse_calendar_date("2013-02-30").is_none());
/// ```
pub fn parse_calendar_date(value: &str) -> Option<CalendarDate> {
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    {
        return Some(to_calendar(date));
    }

    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(to_calendar(datetime.date()));
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| to_calendar(dt.date_naive()))
}

fn to_calendar(date: NaiveDate) -> CalendarDate {
    CalendarDate::from_ymd(date.year(), date.month(), date.day())
}
