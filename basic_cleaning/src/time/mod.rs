//! Timestamp parsing for review dates.

pub mod review_dates;

pub use review_dates::{
    is_midnight, is_whole_second, parse_review_timestamp, MICROS_PER_DAY, MICROS_PER_SECOND,
};
