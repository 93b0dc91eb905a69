use std::sync::Mutex;
use std::time::Duration;

use macrodata_llm::{LlmClassifier, LlmError};
use macrodata_map::{ClassifierError, SourceClassifier};
use macrodata_model::DataSource;

/// Returns a canned reply and records the prompt it was given.
struct CannedChat {
    reply: std::result::Result<String, fn() -> LlmError>,
    prompts: Mutex<Vec<String>>,
}

impl CannedChat {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing(err: fn() -> LlmError) -> Self {
        Self {
            reply: Err(err),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl macrodata_llm::ChatCompletion for CannedChat {
    fn model(&self) -> &str {
        "canned"
    }

    fn complete(&self, user_prompt: &str) -> macrodata_llm::Result<String> {
        self.prompts.lock().unwrap().push(user_prompt.to_string());
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(make) => Err(make()),
        }
    }
}

#[test]
fn routes_to_forecast() {
    let chat = CannedChat::replying(
        r#"{"source": "GREENBOOK", "confidence": 0.9, "reasoning": "mentions greenbook"}"#,
    );
    let classifier = LlmClassifier::new(chat);
    let result = classifier.classify("greenbook real gdp").expect("classify");
    assert_eq!(result.source, DataSource::Forecast);
    assert_eq!(result.reasoning, "mentions greenbook");
    assert_eq!(classifier.name(), "canned");
}

#[test]
fn prompt_contains_query() {
    let chat = CannedChat::replying(r#"{"source": "FRED", "reasoning": "historical"}"#);
    let classifier = LlmClassifier::new(chat);
    classifier.classify("unemployment rate").expect("classify");
    let prompts = classifier.client().prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"unemployment rate\""));
}

#[test]
fn malformed_reply_maps_to_malformed_response() {
    let classifier = LlmClassifier::new(CannedChat::replying("no json here"));
    let err = classifier.classify("gdp").unwrap_err();
    assert!(matches!(err, ClassifierError::MalformedResponse(_)));
}

#[test]
fn timeout_maps_to_timeout() {
    let classifier = LlmClassifier::new(CannedChat::failing(|| {
        LlmError::Timeout(Duration::from_secs(5))
    }));
    let err = classifier.classify("gdp").unwrap_err();
    assert_eq!(err, ClassifierError::Timeout(Duration::from_secs(5)));
}

#[test]
fn missing_key_maps_to_unavailable() {
    let classifier =
        LlmClassifier::new(CannedChat::failing(|| LlmError::MissingApiKey("GROQ_API_KEY")));
    let err = classifier.classify("gdp").unwrap_err();
    assert!(
        matches!(err, ClassifierError::Unavailable(message) if message.contains("GROQ_API_KEY"))
    );
}

#[test]
fn api_error_maps_to_request() {
    let classifier = LlmClassifier::new(CannedChat::failing(|| LlmError::Api {
        status: 503,
        body: "overloaded".to_string(),
    }));
    let err = classifier.classify("gdp").unwrap_err();
    assert!(matches!(err, ClassifierError::Request(message) if message.contains("503")));
}
