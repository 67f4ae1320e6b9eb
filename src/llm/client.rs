use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";

/// Configuration for the chat completion client
#[derive(Clone)]
pub struct ChatConfig {
    /// API key (from OPENAI_API_KEY env var)
    pub api_key: String,
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Model to use (e.g., "gpt-4o")
    pub model: String,
    /// Sampling temperature; high values give freer rewrites
    pub temperature: f64,
    /// Maximum tokens in response
    pub max_tokens: u32,
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ChatConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY environment variable not set")?;

        let mut config = Self::new(api_key, DEFAULT_MODEL.to_string());
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("HUMANIZER_LLM_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    /// Create with custom settings
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            temperature: 0.85,
            max_tokens: 1200,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Anything that can answer a system + user prompt pair
pub trait ChatCompletion {
    fn complete(&self, system: &str, user: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Client for an OpenAI-compatible chat completion endpoint
pub struct ChatClient {
    client: Client,
    config: ChatConfig,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }
}

impl ChatCompletion for ChatClient {
    /// Send a conversation and return the first choice's text
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
        };

        debug!(model = %self.config.model, prompt_bytes = user.len(), "Sending chat completion request");

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to chat completion API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat completion API error: {} - {}", status, body);
        }

        let response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        response.first_text()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn first_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .context("No text content in response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url() {
        let mut config = ChatConfig::new("key".to_string(), "gpt-4o".to_string());
        assert_eq!(
            config.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );

        config.base_url = "http://localhost:8080/v1/".to_string();
        assert_eq!(config.completions_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ChatConfig::new("sk-secret".to_string(), "gpt-4o".to_string());
        assert!(!format!("{config:?}").contains("sk-secret"));
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "gpt-4o",
            temperature: 0.85,
            max_tokens: 1200,
            messages: vec![Message {
                role: "user",
                content: "hi",
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["max_tokens"], 1200);
    }

    #[test]
    fn test_parse_response() {
        let json = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  Rewritten text.\n"}}
            ]
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_text().unwrap(), "Rewritten text.");
    }

    #[test]
    fn test_parse_response_without_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(response.first_text().is_err());
    }
}
