//! Resolution of free-text queries to catalog variables.
//!
//! A query is classified as historical or forecast, matched against the
//! catalog entries of that source, and the ranked candidates are reduced to
//! a single resolved variable, a short list to choose from, or no match.

#![deny(unsafe_code)]

pub mod classify;
pub mod disambiguate;
pub mod resolver;
pub mod score;
pub mod utils;

pub use classify::{
    ClassifierError, KeywordClassifier, SourceClassifier, UnavailableClassifier,
};
pub use disambiguate::{DEFAULT_MARGIN, DEFAULT_MAX_CHOICES, Disambiguator};
pub use resolver::{CALLER_SELECTED_REASONING, DEFAULT_THRESHOLD, Resolver, ResolverConfig};
pub use score::FuzzyMatcher;
pub use utils::{normalize_text, tokenize};
