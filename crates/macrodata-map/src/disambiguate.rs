//! Reduces ranked candidates to a resolution outcome.

use std::cmp::Ordering;

use macrodata_model::{MatchCandidate, ResolutionOutcome};

/// Minimum lead the top candidate needs over the runner-up to win outright.
pub const DEFAULT_MARGIN: f64 = 0.15;

/// Longest candidate list offered for an ambiguous query.
pub const DEFAULT_MAX_CHOICES: usize = 10;

/// Scores closer than this are treated as equal when compared against the
/// threshold and the margin.
const SCORE_TOLERANCE: f64 = 1e-9;

/// Pure decision between `Resolved`, `AmbiguousChoice` and `NoMatch`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disambiguator {
    pub margin: f64,
    pub max_choices: usize,
}

impl Default for Disambiguator {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            max_choices: DEFAULT_MAX_CHOICES,
        }
    }
}

impl Disambiguator {
    pub fn new(margin: f64, max_choices: usize) -> Self {
        Self {
            margin: margin.clamp(0.0, 1.0),
            max_choices: max_choices.max(1),
        }
    }

    /// Decide the outcome for `query` given scored `candidates`.
    ///
    /// Candidates scoring below `threshold` are discarded. A single survivor,
    /// or a top score ahead of the runner-up by more than the margin,
    /// resolves. Otherwise the survivors (capped at `max_choices`) are
    /// returned for the caller to choose from.
    pub fn disambiguate(
        &self,
        query: &str,
        candidates: Vec<MatchCandidate>,
        threshold: f64,
    ) -> ResolutionOutcome {
        let mut survivors: Vec<MatchCandidate> = candidates
            .into_iter()
            .filter(|candidate| candidate.score + SCORE_TOLERANCE >= threshold)
            .collect();
        survivors.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        match survivors.len() {
            0 => ResolutionOutcome::no_match(query),
            1 => ResolutionOutcome::Resolved {
                candidate: survivors.remove(0),
            },
            _ if survivors[0].score - survivors[1].score > self.margin + SCORE_TOLERANCE => {
                ResolutionOutcome::Resolved {
                    candidate: survivors.remove(0),
                }
            }
            _ => {
                survivors.truncate(self.max_choices);
                ResolutionOutcome::AmbiguousChoice {
                    candidates: survivors,
                }
            }
        }
    }
}
