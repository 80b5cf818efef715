use polars::prelude::*;

use crate::core::domain::{GeoBounds, PriceRange, LATITUDE, LONGITUDE, PRICE};

/// Inclusive `[min, max]` predicate on a column read as text.
///
/// Surrounding whitespace is ignored. Values that do not parse as numbers (or
/// are null) evaluate to null and are dropped by `filter`.
fn between(column: &str, min: f64, max: f64) -> Expr {
    let value = col(column)
        .cast(DataType::String)
        .str()
        .strip_chars(lit(NULL))
        .cast(DataType::Float64);
    value.clone().gt_eq(lit(min)).and(value.lt_eq(lit(max)))
}

fn geo_predicate(bounds: &GeoBounds) -> Expr {
    between(LONGITUDE, bounds.min_longitude, bounds.max_longitude).and(between(
        LATITUDE,
        bounds.min_latitude,
        bounds.max_latitude,
    ))
}

/// Keep rows where `column` lies in `[min_value, max_value]`.
///
/// Row order is preserved.
pub fn filter_by_range(
    df: &DataFrame,
    column: &str,
    min_value: f64,
    max_value: f64,
) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .filter(between(column, min_value, max_value))
        .collect()
}

/// Drop rows whose price is outside `range`.
pub fn filter_by_price(df: &DataFrame, range: PriceRange) -> PolarsResult<DataFrame> {
    filter_by_range(df, PRICE, range.min, range.max)
}

/// Drop rows located outside `bounds`.
pub fn filter_by_geo_bounds(df: &DataFrame, bounds: &GeoBounds) -> PolarsResult<DataFrame> {
    df.clone().lazy().filter(geo_predicate(bounds)).collect()
}
