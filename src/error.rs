use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building humanizer configuration or phrase tables
///
/// The transform itself has no failure modes; short or empty input is
/// reported through [`crate::models::Rejection`] instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a probability in [0, 1], got {value}")]
    InvalidProbability { field: &'static str, value: f64 },

    #[error("phrase table `{table}` is empty")]
    EmptyPhraseTable { table: &'static str },

    #[error("phrase table `{table}` has a blank entry at index {index}")]
    BlankPhrase { table: &'static str, index: usize },

    #[error("failed to read {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", describe_source(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },
}

fn describe_source(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("{path:?}"),
        None => "inline JSON".to_string(),
    }
}
