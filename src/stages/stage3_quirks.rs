use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;

/// Configuration for quirk injection
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuirkConfig {
    /// Chance, per sentence-final word, of slotting in a quirk fragment
    pub quirk_probability: f64,
}

impl Default for QuirkConfig {
    fn default() -> Self {
        Self {
            quirk_probability: 0.2,
        }
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Interleave quirk fragments before terminal punctuation
///
/// Operates on flattened paragraph text. Every word ending in `.`, `!` or
/// `?` may become `word, <quirk><punct>`; all other words pass through.
/// The result is re-joined with single spaces.
pub fn inject_quirks<R: Rng + ?Sized>(
    text: &str,
    quirks: &[String],
    config: &QuirkConfig,
    rng: &mut R,
) -> String {
    text.split_whitespace()
        .map(|word| {
            let stem = word.trim_end_matches(is_terminal);
            // Not sentence-final, or nothing but punctuation
            if stem.len() == word.len() || stem.is_empty() {
                return word.to_string();
            }
            if !rng.random_bool(config.quirk_probability) {
                return word.to_string();
            }
            match quirks.choose(rng) {
                Some(quirk) => format!("{stem}, {}{}", quirk.trim(), &word[stem.len()..]),
                None => word.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn quirks() -> Vec<String> {
        vec!["you know".to_string()]
    }

    #[test]
    fn test_inject_quirks_always() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = QuirkConfig {
            quirk_probability: 1.0,
        };

        let result = inject_quirks("It works. Really?! Fine", &quirks(), &config, &mut rng);

        assert_eq!(result, "It works, you know. Really, you know?! Fine");
    }

    #[test]
    fn test_inject_quirks_never_normalizes_whitespace() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = QuirkConfig {
            quirk_probability: 0.0,
        };

        let result = inject_quirks("It  works.\n Next\tone.", &quirks(), &config, &mut rng);

        assert_eq!(result, "It works. Next one.");
    }

    #[test]
    fn test_inject_quirks_skips_bare_punctuation() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = QuirkConfig {
            quirk_probability: 1.0,
        };

        let result = inject_quirks("Wait ... what", &quirks(), &config, &mut rng);

        assert_eq!(result, "Wait ... what");
    }

    #[test]
    fn test_inject_quirks_never_shrinks_word_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let text = "One sentence here. Another one there! A third? And a tail";

        let result = inject_quirks(
            text,
            &crate::models::PhraseTable::default().quirks,
            &QuirkConfig {
                quirk_probability: 0.5,
            },
            &mut rng,
        );

        assert!(result.split_whitespace().count() >= text.split_whitespace().count());
    }
}
