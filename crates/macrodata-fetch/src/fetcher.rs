use macrodata_model::{DataSource, SeriesData, VariableEntry};

use crate::error::Result;

/// A file extracted from a downloaded archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFile {
    /// Path inside the archive.
    pub name: String,
    pub contents: Vec<u8>,
}

/// What a fetcher produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutput {
    /// A parsed time series (FRED).
    Series(SeriesData),
    /// Raw files from a provider archive (Greenbook).
    Archive {
        series_id: String,
        files: Vec<ArchiveFile>,
    },
}

/// Retrieves data for a resolved catalog entry.
pub trait SeriesFetcher: Send + Sync {
    fn name(&self) -> &str;

    fn fetch(&self, entry: &VariableEntry) -> Result<FetchOutput>;
}

/// The fetcher responsible for each source.
pub struct FetcherSet {
    pub historical: Box<dyn SeriesFetcher>,
    pub forecast: Box<dyn SeriesFetcher>,
}

impl FetcherSet {
    pub fn new(historical: Box<dyn SeriesFetcher>, forecast: Box<dyn SeriesFetcher>) -> Self {
        Self {
            historical,
            forecast,
        }
    }

    pub fn for_source(&self, source: DataSource) -> &dyn SeriesFetcher {
        match source {
            DataSource::Historical => self.historical.as_ref(),
            DataSource::Forecast => self.forecast.as_ref(),
        }
    }

    /// Fetch `entry` with the fetcher for its own source.
    pub fn fetch(&self, entry: &VariableEntry) -> Result<FetchOutput> {
        self.for_source(entry.source).fetch(entry)
    }
}

impl std::fmt::Debug for FetcherSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetcherSet")
            .field("historical", &self.historical.name())
            .field("forecast", &self.forecast.name())
            .finish()
    }
}
