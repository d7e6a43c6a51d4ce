//! The two date formats of the interchange schema.
//!
//! Cruise start/end and expense dates are date-only; port arrival/departure
//! carry a local wall-clock timestamp without timezone offset. Import is
//! lenient for port timestamps: older exports wrote date-only values there,
//! so the date-only form is accepted as a fallback meaning midnight.

use chrono::{NaiveDate, NaiveDateTime};

/// Date-only interchange format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Port timestamp interchange format (local, no offset).
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format a date-only value.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a port timestamp.
pub fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

/// Parse a date-only value. `None` when the string does not match.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Parse a port timestamp, accepting the date-only form as midnight.
pub fn parse_port_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .ok()
        .or_else(|| parse_date(value).and_then(|d| d.and_hms_opt(0, 0, 0)))
}
