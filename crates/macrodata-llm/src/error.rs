use std::time::Duration;

use macrodata_map::ClassifierError;
use thiserror::Error;

/// Errors from the chat client and response parsing.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse LLM response: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, LlmError>;

impl From<LlmError> for ClassifierError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey(_) | LlmError::Client(_) => {
                ClassifierError::Unavailable(err.to_string())
            }
            LlmError::Timeout(after) => ClassifierError::Timeout(after),
            LlmError::Network(_) | LlmError::Api { .. } => ClassifierError::Request(err.to_string()),
            LlmError::Parse(message) => ClassifierError::MalformedResponse(message),
        }
    }
}
