//! The handful of Markdown constructs the notes are made of.
//!
//! Links use the `[[wiki link]]` syntax understood by Obsidian and friends, so
//! note names double as link targets.

/// `[[target]]`
pub fn wiki_link(target: &str) -> String {
    format!("[[{target}]]")
}

/// `[description](url)`
pub fn url_link(description: &str, url: &str) -> String {
    format!("[{description}]({url})")
}

/// A structural tag: `#` followed by the label, first letter upper-cased and
/// the rest lower-cased (`"goodreads"` and `"GOODREADS"` both give
/// `#Goodreads`).
pub fn tag(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => format!("#{}{}", first.to_uppercase(), chars.as_str().to_lowercase()),
        None => "#".to_string(),
    }
}

/// A heading line, newline terminated.
pub fn heading(title: &str, level: usize) -> String {
    format!("{} {title}\n", "#".repeat(level))
}

/// One `- [[item]]` line per item, indented four spaces per `level`.
pub fn link_list<I, S>(items: I, level: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let indent = "    ".repeat(level);
    items.into_iter().map(|item| format!("{indent}- {}\n", wiki_link(item.as_ref()))).collect()
}
