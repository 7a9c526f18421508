mod export;
mod print;

pub use self::export::run as export;
pub use self::print::run as print;

use exn::ResultExt;
use folio_extract::ExportReader;
use folio_library::Library;
use std::path::Path;

use crate::error::{ErrorKind, Result};

/// Opens the export and indexes every row of it.
fn read_library(input: &Path) -> Result<Library> {
    let reader = ExportReader::open(input).or_raise(|| ErrorKind::Input(input.to_path_buf()))?;
    let missing = reader.missing_columns();
    if !missing.is_empty() {
        tracing::warn!(columns = ?missing, "Export is missing required columns");
    }
    Library::build(reader).or_raise(|| ErrorKind::Input(input.to_path_buf()))
}
