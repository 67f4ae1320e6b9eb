use tracing::{info, warn};

use super::cleanup::clean_sentences;
use super::client::ChatCompletion;
use super::prompts::{SYSTEM_PROMPT, build_rewrite_prompt};
use crate::models::{OutputMode, UNPROCESSABLE_MESSAGE, word_count};
use crate::stages::render;

/// Rewrite a document through a chat model
///
/// 1. Drop sentence fragments
/// 2. Refuse input that is still too short (fixed message)
/// 3. Ask the model for a rewrite
///
/// Failures of the remote call are folded into the returned text, rendered
/// like a reply, so the caller always has something to display.
pub async fn rewrite_with_llm<C: ChatCompletion>(
    backend: &C,
    text: &str,
    mode: OutputMode,
    min_words: usize,
) -> String {
    let cleaned = clean_sentences(text);
    let words = word_count(&cleaned);

    if cleaned.is_empty() || words < min_words {
        info!(words, min_words, "Cleaned text too short for LLM rewrite");
        return UNPROCESSABLE_MESSAGE.to_string();
    }

    let rewritten = match backend
        .complete(SYSTEM_PROMPT, &build_rewrite_prompt(&cleaned))
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!("LLM rewrite failed: {:#}", e);
            format!("LLM rewrite failed: {:#}", e)
        }
    };

    match mode {
        OutputMode::Plain => rewritten,
        OutputMode::Markup => {
            // Models separate paragraphs with single newlines as often as blank lines
            let lines: Vec<&str> = rewritten.split('\n').collect();
            render(&lines, OutputMode::Markup)
        }
    }
}
