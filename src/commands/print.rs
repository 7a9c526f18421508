use exn::ResultExt;
use folio_config::Config;
use folio_library::Library;
use folio_render::{AuthorNote, BookNote};
use std::io::Write;

use super::read_library;
use crate::cli::Section;
use crate::error::{ErrorKind, Result};

const SEPARATOR: &str = "-----------------------------";

/// Prints the rendered notes to standard output.
pub fn run(config: &Config, section: Section) -> Result<()> {
    let library = read_library(&config.input)?;
    let mut stdout = std::io::stdout().lock();
    write_notes(&mut stdout, &library, section).or_raise(|| ErrorKind::Output)
}

/// Books first, each followed by a separator line, then authors.
fn write_notes(out: &mut impl Write, library: &Library, section: Section) -> std::io::Result<()> {
    if matches!(section, Section::Books | Section::All) {
        for book in library.books() {
            writeln!(out, "{}", BookNote(book))?;
            writeln!(out, "{SEPARATOR}")?;
        }
    }
    if matches!(section, Section::Authors | Section::All) {
        for author in library.authors() {
            writeln!(out, "{}", AuthorNote(author))?;
        }
    }
    out.flush()
}
