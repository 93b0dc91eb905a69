use std::time::Duration;

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "GROQ_API_KEY";
/// Environment variable overriding the model name.
pub const MODEL_ENV_VAR: &str = "GROQ_MODEL";
/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV_VAR: &str = "GROQ_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Chat-completions settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            max_tokens: 500,
            timeout: Duration::from_secs(5),
        }
    }
}

impl LlmConfig {
    /// Defaults with `GROQ_MODEL` and `GROQ_BASE_URL` applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(model) = env_non_empty(MODEL_ENV_VAR) {
            config.model = model;
        }
        if let Some(base_url) = env_non_empty(BASE_URL_ENV_VAR) {
            config.base_url = base_url;
        }
        config
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub(crate) fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

pub(crate) fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_url_handles_trailing_slash() {
        let config = LlmConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..LlmConfig::default()
        };
        assert_eq!(config.completions_url(), "http://localhost:8080/v1/chat/completions");
    }
}
