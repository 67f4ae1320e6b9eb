use crate::models::word_count;
use crate::stages::{split_paragraphs, split_sentences};

/// Sentences shorter than this are dropped before rewriting
pub const MIN_SENTENCE_WORDS: usize = 3;

/// Keep only well-formed sentences, flattened to a single line
///
/// Fragments such as headings, stray bullets and one-word lines carry little
/// meaning for the rewrite model and tend to derail it.
pub fn clean_sentences(text: &str) -> String {
    split_paragraphs(text)
        .into_iter()
        .flat_map(split_sentences)
        .filter(|sentence| word_count(sentence) >= MIN_SENTENCE_WORDS)
        .map(|sentence| sentence.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_sentences_drops_fragments() {
        let text = "Overview\n\nThe system rewrites text. Fast!\nIt keeps   meaning intact.";

        assert_eq!(
            clean_sentences(text),
            "The system rewrites text. It keeps meaning intact."
        );
    }

    #[test]
    fn test_clean_sentences_empty() {
        assert_eq!(clean_sentences("Hi. Ok."), "");
    }
}
