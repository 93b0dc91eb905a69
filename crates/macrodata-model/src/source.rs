use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Upstream data source a variable belongs to.
///
/// Historical series come from FRED; forecasts come from the
/// Greenbook/Tealbook staff projections published by the Philadelphia Fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Actual observed data (FRED).
    #[serde(alias = "fred", alias = "FRED", alias = "HISTORICAL")]
    Historical,
    /// Staff forecasts and projections (Greenbook/Tealbook).
    #[serde(
        alias = "greenbook",
        alias = "tealbook",
        alias = "GREENBOOK",
        alias = "FORECAST"
    )]
    Forecast,
}

impl DataSource {
    /// All sources in declaration order.
    pub const ALL: [DataSource; 2] = [DataSource::Historical, DataSource::Forecast];

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Historical => "historical",
            DataSource::Forecast => "forecast",
        }
    }

    /// Returns the name of the upstream provider serving this source.
    pub fn provider(&self) -> &'static str {
        match self {
            DataSource::Historical => "FRED",
            DataSource::Forecast => "Greenbook/Tealbook",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = ModelError;

    /// Parse a source name. Accepts the canonical names as well as the
    /// provider names an LLM tends to answer with.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HISTORICAL" | "FRED" => Ok(DataSource::Historical),
            "FORECAST" | "GREENBOOK" | "TEALBOOK" | "GREENBOOK/TEALBOOK" => {
                Ok(DataSource::Forecast)
            }
            _ => Err(ModelError::UnknownSource(s.to_string())),
        }
    }
}
