//! FRED (Federal Reserve Economic Data) client.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use macrodata_model::{Frequency, Observation, SeriesData, VariableEntry};

use crate::error::{FetchError, Result};
use crate::fetcher::{FetchOutput, SeriesFetcher};

/// Environment variable holding the FRED API key.
pub const FRED_API_KEY_ENV_VAR: &str = "FRED_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org/fred";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Descriptive metadata for a FRED series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesInfo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub frequency_short: Option<String>,
    #[serde(default)]
    pub units: String,
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    seriess: Vec<SeriesInfo>,
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

/// Blocking FRED API client.
pub struct FredClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for FredClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FredClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FredClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Client using the key in `FRED_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(FRED_API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(FetchError::MissingApiKey(FRED_API_KEY_ENV_VAR))?;
        Self::new(api_key.trim())
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Endpoint URL with the query parameters encoded.
    fn request_url(&self, endpoint: &str, series_id: &str) -> Result<Url> {
        let url = format!("{}/{endpoint}", self.base_url);
        Url::parse_with_params(
            &url,
            [
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
            ],
        )
        .map_err(|e| FetchError::InvalidUrl {
            url,
            reason: e.to_string(),
        })
    }

    fn get(&self, endpoint: &str, series_id: &str) -> Result<String> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, series_id, "requesting FRED");
        let response = self
            .client
            .get(self.request_url(endpoint, series_id)?)
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(FetchError::Api {
                status: status.as_u16(),
                url,
                body,
            });
        }
        Ok(body)
    }

    pub fn series_info(&self, series_id: &str) -> Result<SeriesInfo> {
        parse_series_info(&self.get("series", series_id)?)
    }

    pub fn observations(&self, series_id: &str) -> Result<Vec<Observation>> {
        parse_observations(&self.get("series/observations", series_id)?)
    }

    /// Fetch a series with its metadata, dates moved to period end.
    pub fn get_series(&self, series_id: &str) -> Result<SeriesData> {
        let info = self.series_info(series_id)?;
        let observations = self.observations(series_id)?;
        let frequency = info
            .frequency_short
            .as_deref()
            .and_then(|code| code.parse::<Frequency>().ok());
        let observations =
            normalize_observations(observations, frequency.unwrap_or(Frequency::Monthly));
        if observations.is_empty() {
            return Err(FetchError::Empty(series_id.to_string()));
        }
        info!(
            series_id,
            observations = observations.len(),
            "fetched FRED series"
        );
        Ok(SeriesData {
            series_id: info.id,
            title: info.title,
            frequency,
            units: info.units,
            observations,
        })
    }
}

impl SeriesFetcher for FredClient {
    fn name(&self) -> &str {
        "fred"
    }

    fn fetch(&self, entry: &VariableEntry) -> Result<FetchOutput> {
        self.get_series(entry.upstream_id()).map(FetchOutput::Series)
    }
}

/// Parse the body of `series/observations`. FRED marks missing values
/// with `"."`.
pub fn parse_observations(body: &str) -> Result<Vec<Observation>> {
    let response: ObservationsResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;
    response
        .observations
        .into_iter()
        .map(|raw| {
            let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d")
                .map_err(|e| FetchError::Parse(format!("date `{}`: {e}", raw.date)))?;
            let value = match raw.value.trim() {
                "." | "" => None,
                text => Some(
                    text.parse::<f64>()
                        .map_err(|e| FetchError::Parse(format!("value `{text}`: {e}")))?,
                ),
            };
            Ok(Observation { date, value })
        })
        .collect()
}

/// Parse the body of `series`.
pub fn parse_series_info(body: &str) -> Result<SeriesInfo> {
    let response: SeriesResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;
    response
        .seriess
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Parse("series response has no entries".to_string()))
}

/// Moves dates to period end, sorts ascending and keeps one observation
/// per date, preferring the latest non-missing value.
pub fn normalize_observations(
    observations: Vec<Observation>,
    frequency: Frequency,
) -> Vec<Observation> {
    let mut shifted: Vec<Observation> = observations
        .into_iter()
        .map(|obs| Observation {
            date: frequency.period_end(obs.date),
            value: obs.value,
        })
        .collect();
    shifted.sort_by_key(|obs| obs.date);

    let mut out: Vec<Observation> = Vec::with_capacity(shifted.len());
    for obs in shifted {
        match out.last_mut() {
            Some(last) if last.date == obs.date => {
                if obs.value.is_some() {
                    last.value = obs.value;
                }
            }
            _ => out.push(obs),
        }
    }
    out
}
