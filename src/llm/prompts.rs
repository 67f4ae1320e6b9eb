/// System prompt for the rewrite model
pub const SYSTEM_PROMPT: &str = "You are a helpful and articulate writing assistant.";

/// Build the user prompt asking for a natural rewrite of `text`
pub fn build_rewrite_prompt(text: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "Take the following AI-generated text and rewrite it to sound more natural, \
         human-like, and conversational. ",
    );
    prompt.push_str(
        "Use richer sentence structures, transitional phrases, and ensure coherence:\n\n",
    );
    prompt.push_str(text);
    prompt.push_str("\n\nRewritten version:");

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rewrite_prompt() {
        let prompt = build_rewrite_prompt("The quick brown fox.");

        assert!(prompt.contains("\n\nThe quick brown fox.\n\n"));
        assert!(prompt.ends_with("Rewritten version:"));
    }
}
