use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::models::{OutputMode, Outcome, PhraseTable, Rejection, word_count};
use crate::stages::{
    MergeConfig, QuirkConfig, ToneConfig, inject_quirks, inject_tone, render, split_paragraphs,
    split_sentences, vary_length,
};

/// Probability used by every stage of the reference behaviour
pub const HISTORICAL_PROBABILITY: f64 = 0.9;

/// Configuration for the whole transform
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HumanizerConfig {
    pub tone: ToneConfig,
    pub merge: MergeConfig,
    pub quirks: QuirkConfig,
    /// Documents with fewer words are rejected by [`Humanizer::process`]
    pub min_words: usize,
}

impl Default for HumanizerConfig {
    fn default() -> Self {
        Self {
            tone: ToneConfig::default(),
            merge: MergeConfig::default(),
            quirks: QuirkConfig::default(),
            min_words: 10,
        }
    }
}

impl HumanizerConfig {
    /// Every probability at 0.9, matching how the reference behaved in practice
    pub fn historical() -> Self {
        Self::with_probability(HISTORICAL_PROBABILITY)
    }

    /// No phrases, merges or quirks; output only normalizes whitespace
    pub fn disabled() -> Self {
        Self::with_probability(0.0)
    }

    fn with_probability(p: f64) -> Self {
        Self {
            tone: ToneConfig {
                opener_probability: p,
                transition_probability: p,
            },
            merge: MergeConfig {
                merge_probability: p,
            },
            quirks: QuirkConfig {
                quirk_probability: p,
            },
            ..Self::default()
        }
    }

    /// Load a config from JSON; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: HumanizerConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: Some(path.to_path_buf()),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("tone.opener_probability", self.tone.opener_probability),
            ("tone.transition_probability", self.tone.transition_probability),
            ("merge.merge_probability", self.merge.merge_probability),
            ("quirks.quirk_probability", self.quirks.quirk_probability),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { field, value });
            }
        }
        Ok(())
    }
}

/// The text-humanization transform
///
/// Holds only read-only configuration, so one instance can be shared across
/// any number of concurrent callers. All randomness comes from the generator
/// passed to each call: a seeded generator makes the output reproducible.
#[derive(Debug, Clone)]
pub struct Humanizer {
    config: HumanizerConfig,
    phrases: Arc<PhraseTable>,
}

impl Default for Humanizer {
    fn default() -> Self {
        Self {
            config: HumanizerConfig::default(),
            phrases: Arc::new(PhraseTable::default()),
        }
    }
}

impl Humanizer {
    pub fn new(config: HumanizerConfig, phrases: Arc<PhraseTable>) -> Result<Self, ConfigError> {
        config.validate()?;
        phrases.validate()?;
        Ok(Self { config, phrases })
    }

    pub fn config(&self) -> &HumanizerConfig {
        &self.config
    }

    /// Check a document against the empty and minimum-length gates
    pub fn check_input(&self, document: &str) -> Option<Rejection> {
        let words = word_count(document);
        if words == 0 {
            Some(Rejection::EmptyInput)
        } else if words < self.config.min_words {
            Some(Rejection::InputTooShort {
                words,
                min_words: self.config.min_words,
            })
        } else {
            None
        }
    }

    /// Gate the document, then transform it
    pub fn process<R: Rng + ?Sized>(
        &self,
        document: &str,
        mode: OutputMode,
        rng: &mut R,
    ) -> Outcome {
        match self.check_input(document) {
            Some(rejection) => {
                debug!(?rejection, "Document rejected");
                Outcome::Rejected(rejection)
            }
            None => Outcome::Humanized(self.humanize(document, mode, rng)),
        }
    }

    /// Transform a document paragraph by paragraph
    ///
    /// Never rejects: empty input yields empty output. Callers that want the
    /// minimum-length gate use [`Humanizer::process`].
    pub fn humanize<R: Rng + ?Sized>(&self, document: &str, mode: OutputMode, rng: &mut R) -> String {
        let paragraphs: Vec<String> = split_paragraphs(document)
            .into_iter()
            .map(|paragraph| self.humanize_paragraph(paragraph, rng))
            .collect();

        debug!(
            paragraphs = paragraphs.len(),
            input_bytes = document.len(),
            %mode,
            "Humanized document"
        );

        render(&paragraphs, mode)
    }

    /// Run the sentence pipeline over a single paragraph
    pub fn humanize_paragraph<R: Rng + ?Sized>(&self, paragraph: &str, rng: &mut R) -> String {
        let sentences = split_sentences(paragraph);
        let sentence_count = sentences.len();

        let toned = inject_tone(&sentences, &self.phrases, &self.config.tone, rng);
        let varied = vary_length(toned, &self.config.merge, rng);

        debug!(
            sentences = sentence_count,
            after_merge = varied.len(),
            "Processed paragraph"
        );

        inject_quirks(
            &varied.join(" "),
            &self.phrases.quirks,
            &self.config.quirks,
            rng,
        )
    }
}
