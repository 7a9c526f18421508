/// Cleans a book title so it can be used both as a note heading and as a
/// file name.
///
/// - `#` is removed; it would start a new tag.
/// - `/` and `\` become a single space; the title is used as a file name.
/// - `[` and `]` become `(` and `)`; square brackets would form phantom wiki
///   links.
///
/// Everything else, whitespace included, is left as-is. The substitutions never
/// produce a character that another substitution would touch, so the function
/// is idempotent.
///
/// ```
/// use folio_extract::sanitize_title;
///
/// assert_eq!(sanitize_title("Test/Book#1"), "Test Book1");
/// assert_eq!(sanitize_title("Dune [Book 1]"), "Dune (Book 1)");
/// ```
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter_map(|c| match c {
            '#' => None,
            '/' | '\\' => Some(' '),
            '[' => Some('('),
            ']' => Some(')'),
            c => Some(c),
        })
        .collect()
}
