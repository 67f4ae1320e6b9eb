use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Static phrase templates the injectors choose from
///
/// Loaded once at startup and shared read-only (usually behind an `Arc`)
/// by every transform call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseTable {
    /// Openers prepended to the first sentence of a paragraph
    pub conversational: Vec<String>,
    /// Connectors prepended to later sentences
    pub transitional: Vec<String>,
    /// Fragments slotted in before terminal punctuation
    pub quirks: Vec<String>,
}

impl Default for PhraseTable {
    fn default() -> Self {
        Self {
            conversational: owned_phrases(&[
                "Honestly,",
                "You know,",
                "Well,",
                "Look,",
                "To be fair,",
                "Truth be told,",
                "If you ask me,",
                "In my experience,",
                "Here's the thing:",
                "So,",
            ]),
            transitional: owned_phrases(&[
                "Also,",
                "Plus,",
                "On top of that,",
                "That said,",
                "Besides,",
                "In fact,",
                "Still,",
                "Meanwhile,",
                "What's more,",
                "Then again,",
            ]),
            quirks: owned_phrases(&[
                "you know",
                "I guess",
                "to be honest",
                "more or less",
                "if that makes sense",
                "kind of",
                "I think",
                "at least for me",
            ]),
        }
    }
}

fn owned_phrases(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|p| p.to_string()).collect()
}

impl PhraseTable {
    /// Parse a table from JSON and check it is usable
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let table: PhraseTable =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse {
                path: None,
                source,
            })?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let table: PhraseTable =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: Some(path.to_path_buf()),
                source,
            })?;
        table.validate()?;
        Ok(table)
    }

    /// Every table must hold at least one non-blank phrase
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, phrases) in self.tables() {
            if phrases.is_empty() {
                return Err(ConfigError::EmptyPhraseTable { table: name });
            }
            if let Some(index) = phrases.iter().position(|p| p.trim().is_empty()) {
                return Err(ConfigError::BlankPhrase { table: name, index });
            }
        }
        Ok(())
    }

    fn tables(&self) -> [(&'static str, &[String]); 3] {
        [
            ("conversational", self.conversational.as_slice()),
            ("transitional", self.transitional.as_slice()),
            ("quirks", self.quirks.as_slice()),
        ]
    }
}
