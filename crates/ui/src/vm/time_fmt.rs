use chrono::{DateTime, Utc};

/// Calendar date for history rows.
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}
