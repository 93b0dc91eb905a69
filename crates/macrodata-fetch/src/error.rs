use std::path::PathBuf;

use thiserror::Error;

/// Errors from fetching or persisting data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),

    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({status}) from {url}: {body}")]
    Api {
        status: u16,
        url: String,
        body: String,
    },

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("archive extraction error: {0}")]
    Archive(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no data returned for {0}")]
    Empty(String),
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// The request URL carries the API key, so it is stripped before the error
/// is rendered.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url().to_string())
    }
}

impl From<zip::result::ZipError> for FetchError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
