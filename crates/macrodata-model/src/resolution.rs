//! Per-query resolution types.
//!
//! These values are created and consumed within a single resolution call;
//! none of them are cached or persisted.

use serde::{Deserialize, Serialize};

use crate::source::DataSource;
use crate::variable::VariableEntry;

/// Reasoning reported when the classifier could not be consulted.
pub const UNAVAILABLE_REASONING: &str = "default: classifier unavailable";

/// A catalog entry scored against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub entry: VariableEntry,
    /// Similarity score in `[0, 1]`.
    pub score: f64,
    /// Which query tokens matched, for logging and `--json` output.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub explanation: String,
}

impl MatchCandidate {
    pub fn new(entry: VariableEntry, score: f64) -> Self {
        Self {
            entry,
            score,
            explanation: String::new(),
        }
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }
}

/// Which source a query is asking for, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub source: DataSource,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ClassificationResult {
    pub fn new(source: DataSource, reasoning: impl Into<String>) -> Self {
        Self {
            source,
            reasoning: reasoning.into(),
            confidence: None,
        }
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    /// The degraded result used whenever classification fails.
    pub fn unavailable() -> Self {
        Self::new(DataSource::Historical, UNAVAILABLE_REASONING)
    }

    pub fn is_fallback(&self) -> bool {
        self.reasoning == UNAVAILABLE_REASONING
    }
}

/// Terminal state of a resolution call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// A single candidate clearly wins.
    Resolved { candidate: MatchCandidate },
    /// Several candidates are too close to call; ordered by descending score.
    AmbiguousChoice { candidates: Vec<MatchCandidate> },
    /// Nothing scored above the threshold.
    ///
    /// Serialized as `unmatched_query`; [`Resolution`] flattens the outcome
    /// next to its own `query` key.
    NoMatch {
        #[serde(rename = "unmatched_query")]
        query: String,
    },
}

impl ResolutionOutcome {
    pub fn no_match(query: impl Into<String>) -> Self {
        Self::NoMatch {
            query: query.into(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    pub fn resolved_entry(&self) -> Option<&VariableEntry> {
        match self {
            Self::Resolved { candidate } => Some(&candidate.entry),
            _ => None,
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Resolved { .. } => "resolved",
            Self::AmbiguousChoice { .. } => "ambiguous",
            Self::NoMatch { .. } => "no_match",
        }
    }
}

/// Outcome of a resolution call annotated with the classification that
/// selected the catalog subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub query: String,
    pub classification: ClassificationResult,
    #[serde(flatten)]
    pub outcome: ResolutionOutcome,
}

impl Resolution {
    pub fn source(&self) -> DataSource {
        self.classification.source
    }

    pub fn reasoning(&self) -> &str {
        &self.classification.reasoning
    }
}
