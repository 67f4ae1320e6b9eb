use rand::Rng;
use serde::Deserialize;

use super::stage1_tone::decapitalize;

/// Literal joining two fused sentences
pub const MERGE_CONNECTOR: &str = " and ";

/// Configuration for the sentence-length variation pass
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Chance of fusing a sentence with the one after it
    pub merge_probability: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            merge_probability: 0.3,
        }
    }
}

/// Vary sentence length by fusing adjacent pairs
///
/// Scans left to right. A fused pair is consumed whole, so the right-hand
/// sentence cannot start another fusion in the same pass. Nothing is
/// dropped or duplicated.
pub fn vary_length<R: Rng + ?Sized>(
    sentences: Vec<String>,
    config: &MergeConfig,
    rng: &mut R,
) -> Vec<String> {
    let mut merged = Vec::with_capacity(sentences.len());
    let mut remaining = sentences.into_iter().peekable();

    while let Some(sentence) = remaining.next() {
        if remaining.peek().is_some() && rng.random_bool(config.merge_probability) {
            if let Some(next) = remaining.next() {
                merged.push(format!("{sentence}{MERGE_CONNECTOR}{}", decapitalize(&next)));
                continue;
            }
        }
        merged.push(sentence);
    }

    merged
}
