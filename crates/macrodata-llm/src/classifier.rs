use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use macrodata_map::{ClassifierError, SourceClassifier};
use macrodata_model::{ClassificationResult, DataSource};

use crate::client::{ChatClient, ChatCompletion};
use crate::error::{LlmError, Result};
use crate::prompts;

#[derive(Debug, Deserialize)]
struct RoutingResponse {
    source: String,
    #[serde(default)]
    confidence: Option<f64>,
    reasoning: String,
    /// The model's cleaned-up restatement of the query. Logged only.
    #[serde(default)]
    query: Option<String>,
}

/// Extracts JSON from a model reply, unwrapping a markdown code fence if
/// present, and deserializes it.
pub fn parse_json_response<T: DeserializeOwned>(response: &str) -> Result<T> {
    let json_str = if response.contains("```json") {
        response
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .map_or(response, str::trim)
    } else if response.contains("```") {
        response.split("```").nth(1).map_or(response, str::trim)
    } else {
        response.trim()
    };

    serde_json::from_str(json_str).map_err(|e| LlmError::Parse(e.to_string()))
}

/// Parses a routing reply into a classification.
pub fn parse_classification(response: &str) -> Result<ClassificationResult> {
    let routing: RoutingResponse = parse_json_response(response)?;
    let source = routing
        .source
        .parse::<DataSource>()
        .map_err(|_| LlmError::Parse(format!("unknown source `{}`", routing.source)))?;
    if let Some(cleaned) = routing.query.as_deref() {
        debug!(cleaned_query = cleaned, "model restated query");
    }
    let mut result = ClassificationResult::new(source, routing.reasoning.trim());
    if let Some(confidence) = routing.confidence {
        result = result.with_confidence(confidence);
    }
    Ok(result)
}

/// Classifier that asks a chat model to route the query.
#[derive(Debug)]
pub struct LlmClassifier<C = ChatClient> {
    client: C,
}

impl<C: ChatCompletion> LlmClassifier<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl LlmClassifier<ChatClient> {
    /// Classifier over the Groq API configured from the environment.
    pub fn from_env() -> Result<Self> {
        ChatClient::from_env().map(Self::new)
    }
}

impl<C: ChatCompletion> SourceClassifier for LlmClassifier<C> {
    fn name(&self) -> &str {
        self.client.model()
    }

    fn classify(&self, query: &str) -> std::result::Result<ClassificationResult, ClassifierError> {
        let reply = self.client.complete(&prompts::routing_prompt(query))?;
        debug!(model = self.client.model(), reply = %reply, "routing reply");
        Ok(parse_classification(&reply)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let result = parse_classification(
            r#"{"source": "GREENBOOK", "confidence": 0.92, "reasoning": "asks for projections", "query": "real gdp"}"#,
        )
        .unwrap();
        assert_eq!(result.source, DataSource::Forecast);
        assert_eq!(result.confidence, Some(0.92));
        assert_eq!(result.reasoning, "asks for projections");
    }

    #[test]
    fn parses_fenced_json() {
        let reply = "Here you go:\n```json\n{\"source\": \"FRED\", \"reasoning\": \"historical\"}\n```";
        let result = parse_classification(reply).unwrap();
        assert_eq!(result.source, DataSource::Historical);
        assert!(result.confidence.is_none());
    }

    #[test]
    fn parses_bare_fence() {
        let reply = "```\n{\"source\": \"fred\", \"reasoning\": \"r\"}\n```";
        assert!(parse_classification(reply).is_ok());
    }

    #[test]
    fn rejects_unknown_source() {
        let err = parse_classification(r#"{"source": "LSEG", "reasoning": "x"}"#).unwrap_err();
        assert!(matches!(err, LlmError::Parse(message) if message.contains("LSEG")));
    }

    #[test]
    fn rejects_missing_reasoning() {
        assert!(parse_classification(r#"{"source": "FRED"}"#).is_err());
    }

    #[test]
    fn rejects_prose() {
        assert!(parse_classification("I think FRED").is_err());
    }
}
