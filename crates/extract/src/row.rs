use std::collections::HashMap;

use crate::error::{ErrorKind, Result};

/// One decoded row of the export, keyed by column name.
///
/// Rows are produced by [`ExportReader`](crate::ExportReader), but can be
/// built from any `(column, value)` pairs which keeps the normalizer
/// independent of the delimited text format.
///
/// ```
/// use folio_extract::Row;
///
/// let row: Row = [("Title", "Dune"), ("Author", "Frank Herbert")].into_iter().collect();
/// assert_eq!(row.get("Title").unwrap(), "Dune");
/// assert!(row.get("Publisher").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: HashMap<String, String>,
}
impl Row {
    /// Value of a column, or [`ErrorKind::MissingField`] when the column is
    /// absent. An empty value is a value, not a missing field.
    pub fn get(&self, column: &'static str) -> Result<&str> {
        match self.fields.get(column) {
            Some(value) => Ok(value.as_str()),
            None => exn::bail!(ErrorKind::MissingField(column)),
        }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
impl From<HashMap<String, String>> for Row {
    fn from(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_present_and_empty() {
        let row: Row = [("Title", "Dune"), ("My Review", "")].into_iter().collect();
        assert_eq!(row.get("Title").unwrap(), "Dune");
        assert_eq!(row.get("My Review").unwrap(), "");
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_get_missing() {
        let row = Row::default();
        assert!(row.is_empty());
        let err = row.get("Book Id").unwrap_err();
        assert_eq!(*err, ErrorKind::MissingField("Book Id"));
    }

    #[test]
    fn test_column_names_are_exact() {
        let row: Row = [("title", "lowercase")].into_iter().collect();
        assert!(row.contains("title"));
        assert!(!row.contains("Title"));
        assert!(row.get("Title").is_err());
    }
}
