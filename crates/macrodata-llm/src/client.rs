//! OpenAI-compatible chat-completions client.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::{API_KEY_ENV_VAR, LlmConfig, env_non_empty};
use crate::error::{LlmError, Result};
use crate::prompts;

/// A single-turn text completion.
pub trait ChatCompletion: Send + Sync {
    /// Model identifier, for logs.
    fn model(&self) -> &str;

    fn complete(&self, user_prompt: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

/// Blocking chat client.
pub struct ChatClient {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    pub fn new(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Client(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Build a client from `GROQ_API_KEY` and [`LlmConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        let api_key =
            env_non_empty(API_KEY_ENV_VAR).ok_or(LlmError::MissingApiKey(API_KEY_ENV_VAR))?;
        Self::new(api_key, LlmConfig::from_env())
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }
}

impl ChatCompletion for ChatClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    fn complete(&self, user_prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "messages": [
                { "role": "system", "content": prompts::SYSTEM_PROMPT },
                { "role": "user", "content": user_prompt },
            ],
        });

        debug!(model = %self.config.model, "sending chat completion request");
        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.config.timeout)
                } else {
                    LlmError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| LlmError::Parse(format!("chat response: {e}")))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::Parse("response contained no message".to_string()))
    }
}
