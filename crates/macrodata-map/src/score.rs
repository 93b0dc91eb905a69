//! Fuzzy scoring of a query against catalog entries.
//!
//! Scores are token-level: each query token is paired with its closest
//! target token by Jaro-Winkler similarity, and the matched weight is
//! turned into a Dice coefficient. An entry is scored against its display
//! name, its description, and both together; the best of the three wins.
//! An exact name, code, alias or description scores 1.0.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler;
use tracing::trace;

use macrodata_model::{MatchCandidate, VariableEntry};

use crate::utils::{normalize_text, tokenize};

/// Minimum Jaro-Winkler similarity for two tokens to count as the same word.
pub const DEFAULT_TOKEN_SIMILARITY: f64 = 0.88;

/// Token-level fuzzy matcher.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    token_similarity: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            token_similarity: DEFAULT_TOKEN_SIMILARITY,
        }
    }
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-token similarity floor, clamped to `[0.5, 1.0]`.
    #[must_use]
    pub fn with_token_similarity(mut self, token_similarity: f64) -> Self {
        self.token_similarity = token_similarity.clamp(0.5, 1.0);
        self
    }

    pub fn token_similarity(&self) -> f64 {
        self.token_similarity
    }

    /// Scores every candidate and returns them by descending score.
    ///
    /// Equal scores keep the order of `candidates`. The result is empty only
    /// when `candidates` is.
    pub fn match_entries(&self, query: &str, candidates: &[&VariableEntry]) -> Vec<MatchCandidate> {
        let query_tokens = tokenize(query);
        let normalized_query = normalize_text(query);

        let mut scored: Vec<MatchCandidate> = candidates
            .iter()
            .map(|entry| {
                let (score, explanation) =
                    self.score_prepared(&normalized_query, &query_tokens, entry);
                trace!(code = %entry.code, score, "scored candidate");
                MatchCandidate::new((*entry).clone(), score).with_explanation(explanation)
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored
    }

    /// Similarity of `query` to a single entry, in `[0, 1]`.
    pub fn score(&self, query: &str, entry: &VariableEntry) -> f64 {
        self.score_prepared(&normalize_text(query), &tokenize(query), entry)
            .0
    }

    fn score_prepared(
        &self,
        normalized_query: &str,
        query_tokens: &[String],
        entry: &VariableEntry,
    ) -> (f64, String) {
        if normalized_query.is_empty() {
            return (0.0, String::new());
        }
        if normalized_query == normalize_text(&entry.display_name)
            || normalized_query == normalize_text(&entry.code)
        {
            return (1.0, "exact name".to_string());
        }
        if entry
            .aliases
            .iter()
            .any(|alias| normalized_query == normalize_text(alias))
        {
            return (1.0, "exact alias".to_string());
        }
        if normalized_query == normalize_text(&entry.description) {
            return (1.0, "exact description".to_string());
        }

        let name_tokens = tokenize(&entry.display_name);
        let description_tokens = tokenize(&entry.description);
        let mut all_tokens = name_tokens.clone();
        for token in &description_tokens {
            if !all_tokens.contains(token) {
                all_tokens.push(token.clone());
            }
        }

        let (score, hits) = [&name_tokens, &description_tokens, &all_tokens]
            .into_iter()
            .map(|target| self.dice(query_tokens, target))
            .fold((0.0, Vec::new()), |best, next| {
                if next.0 > best.0 { next } else { best }
            });
        let explanation = if hits.is_empty() {
            String::new()
        } else {
            format!("matched: {}", hits.join(", "))
        };
        (score, explanation)
    }

    /// Soft Dice coefficient between two token sets.
    fn dice<'q>(&self, query: &'q [String], target: &[String]) -> (f64, Vec<&'q str>) {
        if query.is_empty() || target.is_empty() {
            return (0.0, Vec::new());
        }
        let mut overlap = 0.0;
        let mut hits = Vec::new();
        for token in query {
            let best = target
                .iter()
                .map(|other| jaro_winkler::similarity(token.chars(), other.chars()))
                .fold(0.0_f64, f64::max);
            if best >= self.token_similarity {
                overlap += best;
                hits.push(token.as_str());
            }
        }
        let dice = 2.0 * overlap / (query.len() + target.len()) as f64;
        (dice.min(1.0), hits)
    }
}
