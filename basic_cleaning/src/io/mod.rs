//! Output serialization for the cleaned table.

pub mod writers;

pub use writers::write_clean_csv;
