//! Retrieval of resolved variables from their upstream providers and
//! persistence of the results to a local directory.

#![deny(unsafe_code)]

pub mod error;
pub mod fetcher;
pub mod fred;
pub mod greenbook;
pub mod store;

pub use error::{FetchError, Result};
pub use fetcher::{ArchiveFile, FetchOutput, FetcherSet, SeriesFetcher};
pub use fred::{FRED_API_KEY_ENV_VAR, FredClient, SeriesInfo};
pub use greenbook::{GreenbookClient, extract_archive};
pub use store::{DEFAULT_MAX_AGE_DAYS, DataStore, LocalStore, SeriesMetadata, clean_query};
