use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Sampling frequency of a time series, as reported by FRED's
/// `frequency_short` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl Frequency {
    pub fn as_code(&self) -> &'static str {
        match self {
            Frequency::Daily => "D",
            Frequency::Weekly => "W",
            Frequency::BiWeekly => "BW",
            Frequency::Monthly => "M",
            Frequency::Quarterly => "Q",
            Frequency::SemiAnnual => "SA",
            Frequency::Annual => "A",
        }
    }

    /// Moves a date to the last day of its period.
    ///
    /// Only monthly and quarterly series are re-stamped; other frequencies
    /// keep the date FRED reported.
    pub fn period_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Monthly => month_end(date.year(), date.month()).unwrap_or(date),
            Frequency::Quarterly => {
                let quarter_last_month = ((date.month() - 1) / 3 + 1) * 3;
                month_end(date.year(), quarter_last_month).unwrap_or(date)
            }
            _ => date,
        }
    }
}

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::BiWeekly => "Biweekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::SemiAnnual => "Semiannual",
            Frequency::Annual => "Annual",
        };
        write!(f, "{label}")
    }
}

impl FromStr for Frequency {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "D" | "DAILY" => Ok(Frequency::Daily),
            "W" | "WEEKLY" => Ok(Frequency::Weekly),
            "BW" | "BIWEEKLY" => Ok(Frequency::BiWeekly),
            "M" | "MONTHLY" => Ok(Frequency::Monthly),
            "Q" | "QUARTERLY" => Ok(Frequency::Quarterly),
            "SA" | "SEMIANNUAL" => Ok(Frequency::SemiAnnual),
            "A" | "ANNUAL" => Ok(Frequency::Annual),
            _ => Err(ModelError::UnknownFrequency(s.to_string())),
        }
    }
}

/// A single dated value. `None` marks a missing observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// A fetched historical series with its descriptive metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub series_id: String,
    pub title: String,
    pub frequency: Option<Frequency>,
    pub units: String,
    pub observations: Vec<Observation>,
}

impl SeriesData {
    /// Number of non-missing observations.
    pub fn value_count(&self) -> usize {
        self.observations
            .iter()
            .filter(|obs| obs.value.is_some())
            .count()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|obs| obs.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|obs| obs.date)
    }
}
