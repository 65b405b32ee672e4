use std::path::Path;

use csv::ReaderBuilder;
use log::debug;

/// A CSV file loaded into memory.
///
/// `rows` holds the data records only; the header record lives in
/// `headers`. A missing cell (an empty field, or a short record padded out
/// to the header width) is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    /// Column names from the first record.
    pub headers: Vec<String>,
    /// Data records, each padded or truncated to the header width.
    pub rows:    Vec<Vec<Option<String>>>,
}

impl CsvTable {
    /// Reads a CSV file from `path`.
    ///
    /// # Errors
    /// Returns the underlying `csv::Error` when the file cannot be opened
    /// or a record cannot be decoded.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, csv::Error> {
        let mut reader = ReaderBuilder::new().has_headers(true)
                                             .flexible(true)
                                             .from_path(path.as_ref())?;

        let headers: Vec<String> = reader.headers()?
                                         .iter()
                                         .map(str::to_string)
                                         .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<Option<String>> =
                record.iter()
                      .take(headers.len())
                      .map(|cell| {
                          if cell.is_empty() {
                              None
                          } else {
                              Some(cell.to_string())
                          }
                      })
                      .collect();
            row.resize(headers.len(), None);
            rows.push(row);
        }

        debug!("read {} data row(s) from {}", rows.len(), path.as_ref().display());
        Ok(Self { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_headers_and_rows() {
        let file = fixture("id,name\n1,ada\n2,grace\n");
        let table = CsvTable::read(file.path()).unwrap();
        assert_eq!(table.headers, vec!["id", "name"]);
        assert_eq!(table.rows,
                   vec![vec![Some("1".to_string()), Some("ada".to_string())],
                        vec![Some("2".to_string()), Some("grace".to_string())]]);
    }

    #[test]
    fn empty_cells_are_missing() {
        let file = fixture("id,name\n1,\n");
        let table = CsvTable::read(file.path()).unwrap();
        assert_eq!(table.rows, vec![vec![Some("1".to_string()), None]]);
    }

    #[test]
    fn short_records_are_padded() {
        let file = fixture("id,name,age\n1,ada\n");
        let table = CsvTable::read(file.path()).unwrap();
        assert_eq!(table.rows,
                   vec![vec![Some("1".to_string()), Some("ada".to_string()), None]]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(CsvTable::read("definitely/not/here.csv").is_err());
    }
}
