use log::debug;
use polars::prelude::*;
use std::path::Path;

use crate::core::domain::REQUIRED_COLUMNS;
use crate::error::{CleaningError, CleaningResult};

/// Parse the raw listings CSV into a Polars DataFrame.
///
/// Every column is read as text so columns the step does not touch are
/// written back unchanged. Numeric predicates cast on the fly.
///
/// Fails with `Parse` on malformed content and with `MissingColumn` if any of
/// `price`, `longitude`, `latitude`, `last_review` is absent.
pub fn parse_listings_csv(csv_path: &Path) -> CleaningResult<DataFrame> {
    let parse_error = |e: PolarsError| CleaningError::Parse {
        path: csv_path.to_path_buf(),
        message: e.to_string(),
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(csv_path.into()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    debug!(
        "Parsed {} with columns {:?}",
        csv_path.display(),
        df.get_column_names()
    );

    check_required_columns(&df)?;
    Ok(df)
}

/// Check that every required column is present, reporting the first missing one.
pub fn check_required_columns(df: &DataFrame) -> CleaningResult<()> {
    let column_names = df.get_column_names();

    for required in REQUIRED_COLUMNS {
        if !column_names.iter().any(|name| name.as_str() == *required) {
            return Err(CleaningError::MissingColumn {
                column: required.to_string(),
            });
        }
    }

    Ok(())
}
