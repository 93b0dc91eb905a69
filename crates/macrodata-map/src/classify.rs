//! Source classification: does a query ask for historical data or for a
//! staff forecast?

use std::sync::Arc;
use std::time::Duration;

use macrodata_model::{ClassificationResult, DataSource};

use crate::utils::tokenize;

/// Errors from a classifier. The resolver never lets these escape; any of
/// them degrades to [`ClassificationResult::unavailable`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    #[error("classifier timed out after {0:?}")]
    Timeout(Duration),

    #[error("classifier request failed: {0}")]
    Request(String),

    #[error("malformed classifier response: {0}")]
    MalformedResponse(String),
}

/// Decides which data source a query refers to.
pub trait SourceClassifier: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn classify(&self, query: &str) -> Result<ClassificationResult, ClassifierError>;
}

impl<T: SourceClassifier + ?Sized> SourceClassifier for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn classify(&self, query: &str) -> Result<ClassificationResult, ClassifierError> {
        (**self).classify(query)
    }
}

impl<T: SourceClassifier + ?Sized> SourceClassifier for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn classify(&self, query: &str) -> Result<ClassificationResult, ClassifierError> {
        (**self).classify(query)
    }
}

/// A classifier that is never available. Every query takes the default
/// historical path.
#[derive(Debug, Clone, Default)]
pub struct UnavailableClassifier {
    reason: String,
}

impl UnavailableClassifier {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl SourceClassifier for UnavailableClassifier {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn classify(&self, _query: &str) -> Result<ClassificationResult, ClassifierError> {
        let reason = if self.reason.is_empty() {
            "no classifier configured"
        } else {
            self.reason.as_str()
        };
        Err(ClassifierError::Unavailable(reason.to_string()))
    }
}

const FORECAST_TERMS: &[&str] = &[
    "forecast",
    "forecasts",
    "forecasted",
    "projection",
    "projections",
    "projected",
    "prediction",
    "predictions",
    "predicted",
    "outlook",
    "greenbook",
    "tealbook",
    "expected",
];

const FORECAST_PHRASES: &[&str] = &["staff forecast", "green book", "teal book"];

/// Offline classifier that routes on forecast vocabulary.
///
/// Queries mentioning projections, forecasts, predictions or the
/// Greenbook/Tealbook go to the forecast source; everything else is
/// historical.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl SourceClassifier for KeywordClassifier {
    fn name(&self) -> &str {
        "keyword"
    }

    fn classify(&self, query: &str) -> Result<ClassificationResult, ClassifierError> {
        let lowered = query.to_lowercase();
        let hit = FORECAST_PHRASES
            .iter()
            .find(|phrase| lowered.contains(*phrase))
            .map(|phrase| (*phrase).to_string())
            .or_else(|| {
                tokenize(query)
                    .into_iter()
                    .find(|token| FORECAST_TERMS.contains(&token.as_str()))
            });

        let result = match hit {
            Some(hit) => ClassificationResult::new(
                DataSource::Forecast,
                format!("query mentions \"{hit}\""),
            )
            .with_confidence(0.9),
            None => ClassificationResult::new(
                DataSource::Historical,
                "no forecast terms; defaulting to historical data",
            )
            .with_confidence(0.6),
        };
        Ok(result)
    }
}
