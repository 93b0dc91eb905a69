//! Resolution orchestrator: classify, filter, match, disambiguate.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use macrodata_catalog::VariableCatalog;
use macrodata_model::{ClassificationResult, DataSource, Resolution, ResolutionOutcome};

use crate::classify::{ClassifierError, SourceClassifier};
use crate::disambiguate::{DEFAULT_MARGIN, DEFAULT_MAX_CHOICES, Disambiguator};
use crate::score::FuzzyMatcher;

/// Minimum score a candidate needs to be considered at all.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Reasoning reported when the caller picks the source explicitly.
pub const CALLER_SELECTED_REASONING: &str = "source selected by caller";

const DEFAULT_CLASSIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Tuning for a [`Resolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    /// Minimum candidate score (default: 0.3).
    pub threshold: f64,
    /// Required lead of the top candidate over the runner-up (default: 0.15).
    pub margin: f64,
    /// Longest list returned for ambiguous queries (default: 10).
    pub max_choices: usize,
    /// How long to wait for the classifier (default: 5s).
    pub classify_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            margin: DEFAULT_MARGIN,
            max_choices: DEFAULT_MAX_CHOICES,
            classify_timeout: DEFAULT_CLASSIFY_TIMEOUT,
        }
    }
}

impl ResolverConfig {
    /// Higher bar for a match and a wider required lead.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            threshold: 0.5,
            margin: 0.25,
            max_choices: 5,
            ..Self::default()
        }
    }

    /// Accepts weaker matches and resolves on a narrower lead.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            threshold: 0.2,
            margin: 0.1,
            max_choices: 15,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_max_choices(mut self, max_choices: usize) -> Self {
        self.max_choices = max_choices.max(1);
        self
    }

    #[must_use]
    pub fn with_classify_timeout(mut self, timeout: Duration) -> Self {
        self.classify_timeout = timeout.max(Duration::from_millis(1));
        self
    }

    fn disambiguator(&self) -> Disambiguator {
        Disambiguator::new(self.margin, self.max_choices)
    }
}

/// Maps free-text queries to catalog variables.
///
/// Cheap to clone; the catalog and classifier are shared.
#[derive(Clone)]
pub struct Resolver {
    catalog: Arc<VariableCatalog>,
    classifier: Arc<dyn SourceClassifier>,
    matcher: FuzzyMatcher,
    config: ResolverConfig,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("catalog_len", &self.catalog.len())
            .field("classifier", &self.classifier.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Resolver {
    pub fn new(catalog: Arc<VariableCatalog>, classifier: Arc<dyn SourceClassifier>) -> Self {
        Self {
            catalog,
            classifier,
            matcher: FuzzyMatcher::default(),
            config: ResolverConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_matcher(mut self, matcher: FuzzyMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn catalog(&self) -> &VariableCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a query, letting the classifier pick the source.
    ///
    /// Never fails: a classifier that errors, panics or exceeds the timeout
    /// yields the default historical classification.
    pub fn resolve(&self, query: &str) -> Resolution {
        let classification = self.classify(query);
        self.resolve_classified(query, classification)
    }

    /// Resolve a query against a source chosen by the caller. The classifier
    /// is not consulted.
    pub fn resolve_with_source(&self, query: &str, source: DataSource) -> Resolution {
        let classification = ClassificationResult::new(source, CALLER_SELECTED_REASONING);
        self.resolve_classified(query, classification)
    }

    fn resolve_classified(&self, query: &str, classification: ClassificationResult) -> Resolution {
        let source = classification.source;
        let subset = self.catalog.filter_by_source(source);
        debug!(
            %source,
            candidates = subset.len(),
            "filtered catalog by source"
        );

        let outcome = if subset.is_empty() {
            ResolutionOutcome::no_match(query)
        } else {
            let matches = self.matcher.match_entries(query, &subset);
            for candidate in matches.iter().take(self.config.max_choices) {
                debug!(
                    code = %candidate.entry.code,
                    score = candidate.score,
                    explanation = %candidate.explanation,
                    "match candidate"
                );
            }
            self.config
                .disambiguator()
                .disambiguate(query, matches, self.config.threshold)
        };

        info!(
            query,
            %source,
            outcome = outcome.kind(),
            code = outcome.resolved_entry().map(|e| e.code.as_str()),
            "resolved query"
        );

        Resolution {
            query: query.to_string(),
            classification,
            outcome,
        }
    }

    fn classify(&self, query: &str) -> ClassificationResult {
        match self.classify_with_timeout(query) {
            Ok(result) => {
                debug!(
                    classifier = self.classifier.name(),
                    source = %result.source,
                    reasoning = %result.reasoning,
                    "classified query"
                );
                result
            }
            Err(err) => {
                warn!(
                    classifier = self.classifier.name(),
                    error = %err,
                    "classification failed; defaulting to historical"
                );
                ClassificationResult::unavailable()
            }
        }
    }

    /// Runs the classifier on a worker thread and waits up to the configured
    /// timeout. A late result is discarded when the worker finishes.
    fn classify_with_timeout(&self, query: &str) -> Result<ClassificationResult, ClassifierError> {
        let (tx, rx) = mpsc::channel();
        let classifier = Arc::clone(&self.classifier);
        let owned_query = query.to_string();

        thread::Builder::new()
            .name("macrodata-classify".to_string())
            .spawn(move || {
                let _ = tx.send(classifier.classify(&owned_query));
            })
            .map_err(|e| ClassifierError::Unavailable(format!("spawn classifier: {e}")))?;

        match rx.recv_timeout(self.config.classify_timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                Err(ClassifierError::Timeout(self.config.classify_timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(ClassifierError::Unavailable(
                "classifier worker exited without a result".to_string(),
            )),
        }
    }
}
