use polars::prelude::*;

use crate::core::domain::LAST_REVIEW;
use crate::time::{is_midnight, is_whole_second, parse_review_timestamp};

/// Layout used when every review timestamp falls on midnight.
pub const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d";
/// Layout used when at least one review timestamp has a time of day.
pub const DATETIME_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Layout used when at least one review timestamp has fractional seconds.
pub const FRACTIONAL_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Outcome of normalizing the `last_review` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewDateSummary {
    /// Values converted to a timestamp
    pub parsed: usize,
    /// Values that were already missing
    pub missing: usize,
    /// Values present but not recognized as a date, now null
    pub unparseable: usize,
    /// Every parsed timestamp lies on a day boundary
    pub all_midnight: bool,
    /// No parsed timestamp has a sub-second part
    pub all_whole_seconds: bool,
}

impl ReviewDateSummary {
    /// Text layout for writing the normalized column back to CSV.
    ///
    /// Date-only data is written as `YYYY-MM-DD`, anything else with the time
    /// of day. Microseconds are written for every value as soon as one value
    /// has a fractional second.
    pub fn output_format(&self) -> &'static str {
        if self.all_midnight {
            DATE_OUTPUT_FORMAT
        } else if self.all_whole_seconds {
            DATETIME_OUTPUT_FORMAT
        } else {
            FRACTIONAL_OUTPUT_FORMAT
        }
    }
}

/// Replace `last_review` with a `Datetime(µs)` column, in place.
///
/// The column keeps its position. Values that cannot be parsed become null
/// rather than failing the run.
pub fn normalize_last_review(df: &mut DataFrame) -> PolarsResult<ReviewDateSummary> {
    let raw = df.column(LAST_REVIEW)?.cast(&DataType::String)?;
    let raw = raw.str()?;

    let parsed: Int64Chunked = raw
        .into_iter()
        .map(|value| value.and_then(parse_review_timestamp))
        .collect();

    let missing = raw.null_count();
    let all_midnight = (&parsed).into_iter().flatten().all(is_midnight);
    let all_whole_seconds = (&parsed).into_iter().flatten().all(is_whole_second);
    let summary = ReviewDateSummary {
        parsed: parsed.len() - parsed.null_count(),
        missing,
        unparseable: parsed.null_count() - missing,
        all_midnight,
        all_whole_seconds,
    };

    let normalized = parsed
        .with_name(LAST_REVIEW.into())
        .into_datetime(TimeUnit::Microseconds, None)
        .into_series();
    df.with_column(normalized)?;

    Ok(summary)
}
