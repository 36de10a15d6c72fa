use chrono::{DateTime, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

/// Wall-clock time only, for rows within one session.
#[must_use]
pub fn format_time(value: DateTime<Utc>) -> String {
    value.format("%H:%M:%S").to_string()
}
