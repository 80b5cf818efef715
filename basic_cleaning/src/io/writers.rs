use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

use crate::error::{CleaningError, CleaningResult};

/// Write the cleaned table as a header-included CSV without an index column.
///
/// Column order follows the frame. Nulls are written as empty fields and
/// datetime columns use `datetime_format`. Parent directories are created as
/// needed and an existing file is overwritten.
pub fn write_clean_csv(
    df: &mut DataFrame,
    path: &Path,
    datetime_format: &str,
) -> CleaningResult<()> {
    let write_error = |message: String| CleaningError::Write {
        path: path.to_path_buf(),
        message,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
    }

    let mut file = File::create(path).map_err(|e| write_error(e.to_string()))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_datetime_format(Some(datetime_format.to_string()))
        .finish(df)
        .map_err(|e| write_error(e.to_string()))
}
