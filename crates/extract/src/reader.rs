//! Decoding of the delimited export file into [`Row`]s.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use exn::ResultExt;
use tracing::instrument;

use crate::Row;
use crate::consts::REQUIRED_COLUMNS;
use crate::error::{ErrorKind, Result};

/// Streams [`Row`]s out of a Goodreads library export.
///
/// The first line is the header row; column order does not matter and extra
/// columns are carried along untouched. Quoted fields may contain commas and
/// line breaks (reviews frequently do).
///
/// ```
/// use folio_extract::ExportReader;
///
/// let csv = "Book Id,Title\n1,\"Hello, World\"\n";
/// let rows = ExportReader::from_reader(csv.as_bytes()).unwrap().collect::<Result<Vec<_>, _>>().unwrap();
/// assert_eq!(rows[0].get("Title").unwrap(), "Hello, World");
/// ```
pub struct ExportReader<R: Read> {
    inner: csv::Reader<R>,
    headers: Vec<String>,
    record: StringRecord,
}
impl ExportReader<File> {
    /// Opens the export at `path`.
    ///
    /// This is the only existence check performed: a missing file raises
    /// [`ErrorKind::NotFound`] before anything else happens.
    #[instrument]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        let file = File::open(path).or_raise(|| ErrorKind::Unreadable(path.to_path_buf()))?;
        Self::from_reader(file)
    }
}
impl<R: Read> ExportReader<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut inner = ReaderBuilder::new().has_headers(true).flexible(false).from_reader(reader);
        let headers = inner
            .headers()
            .or_raise(|| ErrorKind::MalformedCsv(1))?
            .iter()
            // Spreadsheet tools like to prepend a byte order mark.
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        Ok(Self {
            inner,
            headers,
            record: StringRecord::new(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Required columns absent from the header row, in canonical order.
    ///
    /// Purely informational: normalization raises
    /// [`ErrorKind::MissingField`] on its own when it needs one of them.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS.into_iter().filter(|column| !self.headers.iter().any(|h| h == column)).collect()
    }

    fn row(&self) -> Row {
        self.headers.iter().cloned().zip(self.record.iter().map(str::to_string)).collect()
    }
}

impl<R: Read> Iterator for ExportReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.read_record(&mut self.record) {
            Ok(true) => Some(Ok(self.row())),
            Ok(false) => None,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                Some(Err::<Row, _>(e).or_raise(|| ErrorKind::MalformedCsv(line)))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Book Id,Title,Author,Author l-f,Additional Authors,ISBN,My Rating,Publisher,Bookshelves,My Review";

    fn read_all(csv: &str) -> Result<Vec<Row>> {
        ExportReader::from_reader(csv.as_bytes())?.collect()
    }

    #[test]
    fn test_reads_rows_in_order() {
        let csv = format!(
            "{HEADER}\n1,First,A,\"A, A\",,=\"\",5,P,,\n2,Second,B,\"B, B\",,=\"\",0,Q,to-read,\n"
        );
        let rows = read_all(&csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Book Id").unwrap(), "1");
        assert_eq!(rows[1].get("Title").unwrap(), "Second");
        assert_eq!(rows[1].get("Bookshelves").unwrap(), "to-read");
        // Unused columns are kept, not interpreted.
        assert_eq!(rows[0].get("Author l-f").unwrap(), "A, A");
    }

    #[test]
    fn test_quoted_fields_keep_commas_and_newlines() {
        let csv = format!("{HEADER}\n7,\"Title, With Comma\",X,,\"Y, Z\",,3,P,\"fiction, owned\",\"line one\nline two\"\n");
        let rows = read_all(&csv).unwrap();
        assert_eq!(rows[0].get("Title").unwrap(), "Title, With Comma");
        assert_eq!(rows[0].get("Additional Authors").unwrap(), "Y, Z");
        assert_eq!(rows[0].get("My Review").unwrap(), "line one\nline two");
    }

    #[test]
    fn test_crlf_line_endings() {
        let csv = "Book Id,Title\r\n1,One\r\n2,Two\r\n";
        let rows = read_all(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("Title").unwrap(), "Two");
    }

    #[test]
    fn test_strips_byte_order_mark() {
        let csv = "\u{feff}Book Id,Title\n1,One\n";
        let reader = ExportReader::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(reader.headers()[0], "Book Id");
    }

    #[test]
    fn test_empty_export_has_no_rows() {
        assert!(read_all(&format!("{HEADER}\n")).unwrap().is_empty());
    }

    #[test]
    fn test_missing_columns() {
        let reader = ExportReader::from_reader("Book Id,Title,Author\n".as_bytes()).unwrap();
        assert_eq!(
            reader.missing_columns(),
            vec!["Additional Authors", "Publisher", "My Rating", "Bookshelves", "My Review"]
        );
        let full_header = format!("{HEADER}\n");
        let reader = ExportReader::from_reader(full_header.as_bytes()).unwrap();
        assert!(reader.missing_columns().is_empty());
    }

    #[test]
    fn test_unequal_row_length_is_malformed() {
        let err = read_all("Book Id,Title\n1,One,Extra\n").unwrap_err();
        assert!(matches!(&*err, ErrorKind::MalformedCsv(_)));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goodreads_library_export.csv");
        let err = ExportReader::open(&path).err().unwrap();
        assert_eq!(*err, ErrorKind::NotFound(path));
    }

    #[test]
    fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "42,Dune,Frank Herbert,\"Herbert, Frank\",,,4,Ace,,").unwrap();
        drop(file);
        let rows: Vec<Row> = ExportReader::open(&path).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Author").unwrap(), "Frank Herbert");
    }
}
