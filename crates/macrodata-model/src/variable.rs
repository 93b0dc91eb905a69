use serde::{Deserialize, Serialize};

use crate::source::DataSource;

/// A named variable in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableEntry {
    /// Unique short code, e.g. `gdp.price_gdp`.
    pub code: String,
    pub display_name: String,
    pub description: String,
    pub source: DataSource,
    /// Identifier used by the upstream provider (FRED series id or
    /// Greenbook variable code). Falls back to `code` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    /// First publication date as stated by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_date: Option<String>,
    /// Alternative names that map straight to this entry, e.g. `inflation`
    /// for the CPI.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl VariableEntry {
    pub fn new(
        code: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        source: DataSource,
    ) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
            description: description.into(),
            source,
            series_id: None,
            units: None,
            first_date: None,
            aliases: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_series_id(mut self, series_id: impl Into<String>) -> Self {
        self.series_id = Some(series_id.into());
        self
    }

    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// The identifier to send upstream.
    pub fn upstream_id(&self) -> &str {
        self.series_id.as_deref().unwrap_or(&self.code)
    }
}
