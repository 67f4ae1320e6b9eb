use crate::models::OutputMode;

/// Separator between rendered paragraphs
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Join humanized paragraphs into the output document
///
/// In markup mode each non-empty paragraph is escaped and wrapped in its own
/// `<p>` element; empty paragraphs are omitted in both modes.
pub fn render<S: AsRef<str>>(paragraphs: &[S], mode: OutputMode) -> String {
    let non_empty = paragraphs
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty());

    match mode {
        OutputMode::Plain => non_empty.collect::<Vec<_>>().join(PARAGRAPH_SEPARATOR),
        OutputMode::Markup => non_empty
            .map(|p| format!("<p>{}</p>", escape_html(p)))
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR),
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
