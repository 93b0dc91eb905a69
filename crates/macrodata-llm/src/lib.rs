//! Source classification backed by a chat-completions LLM.
//!
//! The default endpoint is Groq's OpenAI-compatible API. Any type
//! implementing [`ChatCompletion`] can stand in for it.

#![deny(unsafe_code)]

pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod prompts;

pub use classifier::{LlmClassifier, parse_classification, parse_json_response};
pub use client::{ChatClient, ChatCompletion};
pub use config::{
    API_KEY_ENV_VAR, BASE_URL_ENV_VAR, DEFAULT_BASE_URL, DEFAULT_MODEL, LlmConfig, MODEL_ENV_VAR,
};
pub use error::{LlmError, Result};
