//! Parsers for the raw listings data.
//!
//! - [`csv_parser`]: Read the raw listings CSV into a polars `DataFrame`

pub mod csv_parser;

#[cfg(test)]
mod csv_parser_tests;

pub use csv_parser::{check_required_columns, parse_listings_csv};
