use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Microseconds in one day.
pub const MICROS_PER_DAY: i64 = 86_400_000_000;
/// Microseconds in one second.
pub const MICROS_PER_SECOND: i64 = 1_000_000;

/// Datetime layouts tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Date-only layouts, interpreted as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a `last_review` value into microseconds since the Unix epoch (naive UTC).
///
/// Returns `None` for empty or unrecognized input; a bad date never fails a run.
///
/// # Examples
///
/// ```
/// use basic_cleaning::time::parse_review_timestamp;
///
/// assert_eq!(parse_review_timestamp("1970-01-02"), Some(86_400_000_000));
/// assert_eq!(parse_review_timestamp("not-a-date"), None);
/// ```
pub fn parse_review_timestamp(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc).timestamp_micros());
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc().timestamp_micros());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| naive.and_utc().timestamp_micros());
        }
    }

    None
}

/// `true` if the timestamp falls exactly on a day boundary.
pub fn is_midnight(micros: i64) -> bool {
    micros.rem_euclid(MICROS_PER_DAY) == 0
}

/// `true` if the timestamp has no sub-second part.
pub fn is_whole_second(micros: i64) -> bool {
    micros.rem_euclid(MICROS_PER_SECOND) == 0
}
