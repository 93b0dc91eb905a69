//! Local persistence of fetched data.
//!
//! Layout under the store root:
//!
//! ```text
//! {clean_query}__series_id={id}.csv            FRED observations (date,value)
//! {clean_query}__series_id={id}.metadata.json
//! greenbook/{series_id}/...                    files from the Greenbook archive
//! greenbook/{series_id}/{series_id}.metadata.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use macrodata_model::{DataSource, SeriesData, VariableEntry};

use crate::error::{FetchError, Result};
use crate::fetcher::{ArchiveFile, FetchOutput};

/// Age after which a Greenbook download is refreshed.
pub const DEFAULT_MAX_AGE_DAYS: i64 = 30;

const GREENBOOK_DIR: &str = "greenbook";

/// Sidecar written next to every persisted dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    pub variable: String,
    pub display_name: String,
    pub description: String,
    pub series_id: String,
    pub source: DataSource,
    pub provider: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
    pub download_date: DateTime<Utc>,
}

impl SeriesMetadata {
    fn for_entry(query: &str, entry: &VariableEntry) -> Self {
        Self {
            variable: entry.code.clone(),
            display_name: entry.display_name.clone(),
            description: entry.description.clone(),
            series_id: entry.upstream_id().to_string(),
            source: entry.source,
            provider: entry.source.provider().to_string(),
            query: query.to_string(),
            title: None,
            units: entry.units.clone(),
            frequency: None,
            files: Vec::new(),
            download_date: Utc::now(),
        }
    }
}

/// Where fetched data ends up.
pub trait DataStore {
    /// Persist `output` and return the paths written, data files first.
    fn save(
        &self,
        query: &str,
        entry: &VariableEntry,
        output: &FetchOutput,
    ) -> Result<Vec<PathBuf>>;

    /// Whether `entry` should be downloaded again. Historical series are
    /// always refetched.
    fn is_stale(&self, entry: &VariableEntry, max_age: Duration) -> bool;
}

/// File-system store rooted at a directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// CSV and metadata paths for a FRED series fetched by `query`.
    pub fn series_paths(&self, query: &str, series_id: &str) -> (PathBuf, PathBuf) {
        let stem = format!("{}__series_id={series_id}", clean_query(query));
        (
            self.root.join(format!("{stem}.csv")),
            self.root.join(format!("{stem}.metadata.json")),
        )
    }

    pub fn archive_dir(&self, series_id: &str) -> PathBuf {
        self.root.join(GREENBOOK_DIR).join(series_id)
    }

    pub fn archive_metadata_path(&self, series_id: &str) -> PathBuf {
        self.archive_dir(series_id)
            .join(format!("{series_id}.metadata.json"))
    }

    /// Read a metadata sidecar.
    pub fn read_metadata(path: &Path) -> Result<SeriesMetadata> {
        let text = fs::read_to_string(path).map_err(|e| FetchError::io(path, e))?;
        serde_json::from_str(&text)
            .map_err(|e| FetchError::Parse(format!("{}: {e}", path.display())))
    }

    fn write_metadata(path: &Path, metadata: &SeriesMetadata) -> Result<()> {
        let json = serde_json::to_string_pretty(metadata)
            .map_err(|e| FetchError::Parse(e.to_string()))?;
        fs::write(path, json).map_err(|e| FetchError::io(path, e))
    }

    fn ensure_dir(dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| FetchError::io(dir, e))
    }

    fn save_series(
        &self,
        query: &str,
        entry: &VariableEntry,
        data: &SeriesData,
    ) -> Result<Vec<PathBuf>> {
        Self::ensure_dir(&self.root)?;
        let (csv_path, meta_path) = self.series_paths(query, &data.series_id);

        let mut writer =
            csv::Writer::from_path(&csv_path).map_err(|e| FetchError::io(&csv_path, e.into()))?;
        writer
            .write_record(["date", "value"])
            .map_err(|e| FetchError::io(&csv_path, e.into()))?;
        for obs in &data.observations {
            let value = obs.value.map(|v| v.to_string()).unwrap_or_default();
            writer
                .write_record([obs.date.format("%Y-%m-%d").to_string(), value])
                .map_err(|e| FetchError::io(&csv_path, e.into()))?;
        }
        writer.flush().map_err(|e| FetchError::io(&csv_path, e))?;

        let mut metadata = SeriesMetadata::for_entry(query, entry);
        metadata.series_id = data.series_id.clone();
        metadata.title = Some(data.title.clone()).filter(|t| !t.is_empty());
        if !data.units.is_empty() {
            metadata.units = Some(data.units.clone());
        }
        metadata.frequency = data.frequency.map(|f| f.to_string());
        metadata.files = vec![file_name(&csv_path)];
        Self::write_metadata(&meta_path, &metadata)?;

        info!(
            path = %csv_path.display(),
            observations = data.observations.len(),
            "saved series"
        );
        Ok(vec![csv_path, meta_path])
    }

    fn save_archive(
        &self,
        query: &str,
        entry: &VariableEntry,
        series_id: &str,
        files: &[ArchiveFile],
    ) -> Result<Vec<PathBuf>> {
        let dir = self.archive_dir(series_id);
        Self::ensure_dir(&dir)?;

        let mut written = Vec::with_capacity(files.len() + 1);
        for file in files {
            let path = dir.join(&file.name);
            if let Some(parent) = path.parent() {
                Self::ensure_dir(parent)?;
            }
            fs::write(&path, &file.contents).map_err(|e| FetchError::io(&path, e))?;
            debug!(path = %path.display(), bytes = file.contents.len(), "wrote archive file");
            written.push(path);
        }

        let mut metadata = SeriesMetadata::for_entry(query, entry);
        metadata.series_id = series_id.to_string();
        metadata.frequency = Some("Quarterly".to_string());
        metadata.files = files.iter().map(|f| f.name.clone()).collect();
        let meta_path = self.archive_metadata_path(series_id);
        Self::write_metadata(&meta_path, &metadata)?;
        written.push(meta_path);

        info!(series_id, files = files.len(), dir = %dir.display(), "saved archive");
        Ok(written)
    }
}

impl DataStore for LocalStore {
    fn save(
        &self,
        query: &str,
        entry: &VariableEntry,
        output: &FetchOutput,
    ) -> Result<Vec<PathBuf>> {
        match output {
            FetchOutput::Series(data) => self.save_series(query, entry, data),
            FetchOutput::Archive { series_id, files } => {
                self.save_archive(query, entry, series_id, files)
            }
        }
    }

    fn is_stale(&self, entry: &VariableEntry, max_age: Duration) -> bool {
        if entry.source == DataSource::Historical {
            return true;
        }
        let path = self.archive_metadata_path(entry.upstream_id());
        match Self::read_metadata(&path) {
            Ok(metadata) => Utc::now() - metadata.download_date > max_age,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "no usable metadata; treating as stale");
                true
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File-name-safe form of a query: lowercase words joined by `_`.
pub fn clean_query(query: &str) -> String {
    let cleaned = query
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if cleaned.is_empty() {
        "query".to_string()
    } else {
        cleaned
    }
}
