use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Message shown instead of a result when input cannot be processed
pub const UNPROCESSABLE_MESSAGE: &str = "Text too short or unprocessable.";

/// How humanized paragraphs are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Paragraphs separated by blank lines
    #[default]
    Plain,
    /// Each paragraph wrapped in `<p>..</p>`
    Markup,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "markup" | "html" => Ok(Self::Markup),
            other => Err(format!("unknown output mode `{other}` (expected plain or markup)")),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Markup => write!(f, "markup"),
        }
    }
}

/// Which rewrite path handles a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// The local stochastic transform
    #[default]
    Rules,
    /// The remote chat model
    Llm,
}

/// Why a document was not transformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// Empty or whitespace-only document
    EmptyInput,
    /// Fewer words than the configured minimum
    InputTooShort { words: usize, min_words: usize },
}

/// Result of a gated transform call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Humanized(String),
    Rejected(Rejection),
}

impl Outcome {
    /// The text to show a user: the result, or the fixed unprocessable message
    pub fn into_display(self) -> String {
        match self {
            Self::Humanized(text) => text,
            Self::Rejected(_) => UNPROCESSABLE_MESSAGE.to_string(),
        }
    }
}

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
