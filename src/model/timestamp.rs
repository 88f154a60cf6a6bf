//! Unix-seconds timestamp formatting.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Display format for timestamps in the table, details and filter chips.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format unix seconds as local time.
pub fn to_local_string(timestamp: f64) -> String {
    format_in(timestamp, &Local)
}

/// Format unix seconds in the given time zone.
///
/// Out-of-range timestamps render as the raw number rather than failing.
pub fn format_in<Tz>(timestamp: f64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match to_datetime(timestamp) {
        Some(utc) => utc.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
        None => timestamp.to_string(),
    }
}

fn to_datetime(timestamp: f64) -> Option<DateTime<Utc>> {
    if !timestamp.is_finite() {
        return None;
    }
    let secs = timestamp.floor();
    let nanos = ((timestamp - secs) * 1e9).round() as u32;
    DateTime::from_timestamp(secs as i64, nanos.min(999_999_999))
}
