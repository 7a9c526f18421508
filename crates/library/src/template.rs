//! Path templating for note files.
//!
//! Turns a [`Document`] into a path relative to the output directory using a
//! user-configured [upon] template. The template syntax follows upon's
//! Mustache-like conventions (`{{ variable }}`, `{{ value|formatter }}`),
//! extended with a couple of path-friendly helpers:
//!
//! - **`slug`**: converts strings to URL-safe slugs, stripping quotation marks
//!   first to avoid artifacts like leading/trailing hyphens.
//! - **`truncate`**: truncates strings to a maximum byte length at a character
//!   boundary, usable as either `truncate(value, n)` or `{{ value|truncate: n }}`.
//!
//! # Template Variables
//!
//! | Variable | Description                                           |
//! |----------|-------------------------------------------------------|
//! | `name`   | Sanitized book title, or the author's name            |
//! | `kind`   | `"book"` or `"author"`                                |
//! | `id`     | Goodreads book ID (empty for authors)                 |
//!
//! # Example
//!
//! ```
//! use folio_extract::models::Author;
//! use folio_library::{Document, PathGenerator};
//!
//! let author = Author::new("Ursula K. Le Guin");
//! let generator: PathGenerator = "{{ kind }}s/{{ name|slug }}".parse().unwrap();
//! let path = generator.generate(&Document::Author(&author)).unwrap();
//! assert_eq!(path, "authors/ursula-k-le-guin");
//! ```

use crate::document::Document;
use crate::error::{Error, ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use folio_storage::validate_path;
use std::str::FromStr;
use tracing::instrument;
use upon::{Engine, Template};

/// Default template for both kinds of note: the bare name.
pub const DEFAULT_TEMPLATE: &str = "{{ name }}";
pub const DEFAULT_EXTENSION: &str = "md";

/// Generates note paths from a [`Document`] and a user-defined template
/// string.
///
/// Constructed via [`FromStr`], which compiles the template eagerly so that
/// syntax errors surface at creation time rather than at render time.
///
/// Rendered values are kept verbatim, surrounding whitespace included, so a
/// note is named exactly like the title or author it links to. Only empty and
/// `.` segments are dropped; [`folio_storage::validate_path`] rejects anything
/// that would leave the output directory.
pub struct PathGenerator {
    engine: Engine<'static>,
    template: Template<'static>,
}
impl FromStr for PathGenerator {
    type Err = Error;

    /// Returns [`ErrorKind::Template`] if the template syntax is invalid.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        // Compile the template early so we can fail-fast in construction.
        let template = engine.compile(s.to_string()).or_raise(|| ErrorKind::Template)?;
        Ok(Self { engine, template })
    }
}
impl PathGenerator {
    /// Renders the template for `document`, returning the normalized path
    /// without any file extension.
    ///
    /// Raises [`ErrorKind::PathConflict`] when the path is empty or escapes
    /// the output directory.
    pub fn generate(&self, document: &Document<'_>) -> Result<String> {
        Self::normalize(self.render(document)?)
    }

    /// Renders the template and appends a file extension.
    ///
    /// The extension is trimmed of leading/trailing dots, so both `"md"` and
    /// `".md"` produce the same result. Dots already in the name are kept, and
    /// an empty name still gives a file:
    ///
    /// ```text
    /// generate(…)                 → "A. Writer"
    /// generate_with_ext(…, "md")  → "A. Writer.md"
    /// generate_with_ext(…, "md")  → ".md"            (empty name)
    /// ```
    pub fn generate_with_ext(&self, document: &Document<'_>, ext: impl AsRef<str>) -> Result<String> {
        let path = self.render(document)?;
        Self::normalize(format!("{path}.{}", ext.as_ref().trim().trim_matches('.')))
    }

    #[instrument(level = "trace", skip_all, fields(kind = %document.kind(), name = document.name()))]
    fn render(&self, document: &Document<'_>) -> Result<String> {
        self.template
            .render(&self.engine, Self::parameters(document))
            .to_string()
            .or_raise(|| ErrorKind::Template)
    }

    /// Validates via [`folio_storage::validate_path`], which also drops empty
    /// and `.` segments.
    fn normalize(path: String) -> Result<String> {
        validate_path(&path).or_raise(|| ErrorKind::PathConflict(path.clone().into())).and_then(|p| {
            p.to_str().map(|p| p.to_string())
            // Infallible: input was String, so won't fail. Here for completeness.
            .ok_or_raise(|| ErrorKind::PathConflict(path.into()))
        })
    }

    fn parameters(document: &Document<'_>) -> upon::Value {
        upon::value! {
            name: document.name().to_string(),
            kind: document.kind().as_str(),
            id: document.id().to_string(),
        }
    }
}

/// Custom [`upon`] extensions for path-safe string manipulation.
mod addons {
    use rslug::slugify;
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    /// Custom formatter that converts strings to URL-safe slugs.
    ///
    /// Strips quotation marks before slugifying to avoid awkward slug output
    /// like `"hello"` becoming `-hello-`.
    fn slug_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => {
                // Various quotation marks: '"''""„"`«»
                let marks = [
                    '\u{0027}', '\u{0022}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{201E}', '\u{201B}',
                    '\u{0060}', '\u{00AB}', '\u{00BB}', '\u{2039}', '\u{203A}',
                ];
                let stripped: String = s.chars().filter(|c| !marks.contains(c)).collect();
                write!(f, "{}", slugify!(&stripped))?
            },
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    /// Truncates a string to a maximum byte length at a character boundary.
    fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> String {
        s[..s.floor_char_boundary(max_bytes)].to_string()
    }

    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("slug", slug_formatter);
        engine.add_function("truncate", truncate_to_char_boundary);
    }
}
