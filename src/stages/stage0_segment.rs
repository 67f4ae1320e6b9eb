use once_cell::sync::Lazy;
use regex::Regex;

/// One or more blank lines (lines holding only whitespace)
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(?:[^\S\n]*\n)+").expect("paragraph break pattern is valid"));

/// Terminal punctuation followed by whitespace; the split point is right after the punctuation
static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence break pattern is valid"));

/// Split a document into trimmed, non-empty paragraphs
///
/// Runs of blank lines collapse to a single boundary, and leading or
/// trailing blank lines never produce empty paragraphs.
pub fn split_paragraphs(document: &str) -> Vec<&str> {
    PARAGRAPH_BREAK
        .split(document)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Split a paragraph into trimmed, non-empty sentences
///
/// Terminal punctuation stays attached to its sentence. A paragraph
/// without any boundary comes back as a single sentence.
pub fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BREAK.find_iter(paragraph) {
        // Punctuation is a single ASCII byte
        let end = boundary.start() + 1;
        push_trimmed(&mut sentences, &paragraph[start..end]);
        start = boundary.end();
    }
    push_trimmed(&mut sentences, &paragraph[start..]);

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let candidate = candidate.trim();
    if !candidate.is_empty() {
        sentences.push(candidate);
    }
}
