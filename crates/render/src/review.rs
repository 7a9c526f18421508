/// HTML fragments Goodreads puts in reviews, and their Markdown counterparts.
/// Anything else is passed through verbatim.
const TRANSLATIONS: [(&str, &str); 3] = [("<br/>", "\n"), ("<strong>", "**"), ("</strong>", "**")];

/// Translates the small subset of review HTML that has a Markdown equivalent.
///
/// ```
/// use folio_render::translate_review;
///
/// assert_eq!(
///     translate_review("Great book<br/>loved it. <strong>Highly recommend</strong>"),
///     "Great book\nloved it. **Highly recommend**",
/// );
/// ```
pub fn translate_review(review: &str) -> String {
    TRANSLATIONS.iter().fold(review.to_string(), |text, (html, markdown)| text.replace(html, markdown))
}
