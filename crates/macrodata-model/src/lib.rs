pub mod error;
pub mod resolution;
pub mod series;
pub mod source;
pub mod variable;

pub use error::ModelError;
pub use resolution::{
    ClassificationResult, MatchCandidate, Resolution, ResolutionOutcome, UNAVAILABLE_REASONING,
};
pub use series::{Frequency, Observation, SeriesData};
pub use source::DataSource;
pub use variable::VariableEntry;
