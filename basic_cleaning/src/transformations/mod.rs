//! Row filtering and column normalization for the listings table.
//!
//! # Modules
//!
//! - [`filtering`]: Price range and geographic bounding box filters
//! - [`cleaning`]: Normalize `last_review` to a datetime column
//!
//! # Example
//!
//! ```no_run
//! use basic_cleaning::transformations::{filter_by_geo_bounds, filter_by_price};
//! use basic_cleaning::{GeoBounds, PriceRange};
//! use polars::prelude::*;
//!
//! # fn example(df: DataFrame) -> Result<(), PolarsError> {
//! let priced = filter_by_price(&df, PriceRange::new(10.0, 350.0))?;
//! let located = filter_by_geo_bounds(&priced, &GeoBounds::NYC)?;
//! # Ok(())
//! # }
//! ```

pub mod cleaning;
pub mod filtering;

pub use cleaning::{normalize_last_review, ReviewDateSummary};
pub use filtering::{filter_by_geo_bounds, filter_by_price, filter_by_range};
