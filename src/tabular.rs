/// CSV file reading.
///
/// Wraps the `csv` crate behind a small table type: the first record is the
/// header row, and empty cells are read as missing.
pub mod import;

/// SQL text generation.
///
/// Produces Oracle-flavored `CREATE TABLE` and `INSERT` statements from
/// tabular data, with column-type inference and identifier adjustment.
pub mod sql;
