//! Greenbook/Tealbook archives published by the Philadelphia Fed.

use std::io::{Cursor, Read};
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use macrodata_model::VariableEntry;

use crate::error::{FetchError, Result};
use crate::fetcher::{ArchiveFile, FetchOutput, SeriesFetcher};

const DEFAULT_BASE_URL: &str =
    "https://www.philadelphiafed.org/-/media/FRBP/Assets/Surveys-And-Data/greenbook-data/GBweb";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Downloads the column-format archive for a Greenbook variable.
pub struct GreenbookClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for GreenbookClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreenbookClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GreenbookClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn download_url(&self, series_id: &str) -> String {
        format!("{}/Gbweb%5F{series_id}%5FColumn%5FFormat.zip", self.base_url)
    }

    /// Download and unpack the archive for `series_id`.
    pub fn download(&self, series_id: &str) -> Result<Vec<ArchiveFile>> {
        let url = self.download_url(series_id);
        debug!(%url, "downloading Greenbook archive");
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                url,
                body,
            });
        }
        let bytes = response.bytes()?;
        let files = extract_archive(&bytes)?;
        info!(series_id, files = files.len(), "extracted Greenbook archive");
        Ok(files)
    }
}

impl SeriesFetcher for GreenbookClient {
    fn name(&self) -> &str {
        "greenbook"
    }

    fn fetch(&self, entry: &VariableEntry) -> Result<FetchOutput> {
        let series_id = entry.upstream_id().to_string();
        let files = self.download(&series_id)?;
        Ok(FetchOutput::Archive { series_id, files })
    }
}

/// Unpack every file in a zip archive held in memory. Directory entries
/// and entries with unsafe paths are skipped.
pub fn extract_archive(data: &[u8]) -> Result<Vec<ArchiveFile>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut files = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        let Some(name) = file.enclosed_name() else {
            debug!(name = file.name(), "skipping archive entry with unsafe path");
            continue;
        };
        let name = name.to_string_lossy().replace('\\', "/");
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| FetchError::Archive(format!("read {name}: {e}")))?;
        files.push(ArchiveFile { name, contents });
    }

    if files.is_empty() {
        return Err(FetchError::Archive("archive contains no files".to_string()));
    }
    Ok(files)
}
