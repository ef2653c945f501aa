//! Miscellaneous common types and wire formats.

use chrono::{NaiveDate, NaiveDateTime};

/// Represents any JSON value. Used for raw API responses.
pub type AnyJson = serde_json::Value;

/// Wire format for date-only fields: `dd-mm-yyyy`.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Wire format for timestamps: `dd-mm-yyyy HH:MM:SS`, 24-hour clock.
pub const DATE_TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Format a date the way the API expects date-only fields.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a timestamp the way the API expects the expiry field.
pub fn format_date_time(date_time: NaiveDateTime) -> String {
    date_time.format(DATE_TIME_FORMAT).to_string()
}
