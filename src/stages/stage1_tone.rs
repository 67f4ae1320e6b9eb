use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;

use crate::models::PhraseTable;

/// Configuration for conversational-tone injection
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    /// Chance of prepending a conversational opener to the first sentence
    pub opener_probability: f64,
    /// Chance, per later sentence, of prepending a transitional phrase
    pub transition_probability: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            opener_probability: 0.5,
            transition_probability: 0.3,
        }
    }
}

/// Prefix sentences with conversational or transitional phrases
///
/// The first sentence may receive an opener; every later sentence is
/// independently eligible for a transition. The sentence count never changes.
pub fn inject_tone<R: Rng + ?Sized>(
    sentences: &[&str],
    phrases: &PhraseTable,
    config: &ToneConfig,
    rng: &mut R,
) -> Vec<String> {
    sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let (probability, table) = if i == 0 {
                (config.opener_probability, &phrases.conversational)
            } else {
                (config.transition_probability, &phrases.transitional)
            };

            if sentence.is_empty() || !rng.random_bool(probability) {
                return sentence.to_string();
            }

            match table.choose(rng) {
                Some(phrase) => format!("{} {}", phrase.trim(), decapitalize(sentence)),
                None => sentence.to_string(),
            }
        })
        .collect()
}

/// Lower-case the first character so the text can follow a phrase or connector
///
/// The pronoun "I" (with its contractions) and acronyms keep their case.
pub fn decapitalize(text: &str) -> String {
    let Some(first_word) = text.split_whitespace().next() else {
        return text.to_string();
    };
    if is_pronoun_i(first_word) || is_acronym(first_word) {
        return text.to_string();
    }

    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => first.to_lowercase().chain(chars).collect(),
        _ => text.to_string(),
    }
}

fn is_pronoun_i(word: &str) -> bool {
    let word = word.trim_end_matches(|c: char| !c.is_alphanumeric());
    word == "I" || word.starts_with("I'") || word.starts_with("I\u{2019}")
}

/// Leading letter run is two or more capitals: "NASA's", "AI-generated", "HTTP"
fn is_acronym(word: &str) -> bool {
    let mut letters = 0;
    for c in word.chars().take_while(|c| c.is_alphabetic()) {
        if !c.is_uppercase() {
            return false;
        }
        letters += 1;
    }
    letters >= 2
}
