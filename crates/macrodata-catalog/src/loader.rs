use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use macrodata_model::{DataSource, VariableEntry};

use crate::catalog::VariableCatalog;
use crate::error::{CatalogError, Result};
use crate::paths::catalog_override;

/// The catalog compiled into the binary.
pub const BUILTIN_CATALOG: &str = include_str!("../catalog/variables.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    variable: Vec<RawVariable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawVariable {
    code: String,
    display_name: String,
    description: String,
    source: String,
    series_id: Option<String>,
    units: Option<String>,
    first_date: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
}

impl RawVariable {
    fn into_entry(self) -> Result<VariableEntry> {
        let source = self
            .source
            .parse::<DataSource>()
            .map_err(|_| CatalogError::UnknownSource {
                code: self.code.clone(),
                value: self.source.clone(),
            })?;
        Ok(VariableEntry {
            code: self.code.trim().to_string(),
            display_name: self.display_name.trim().to_string(),
            description: self.description.trim().to_string(),
            source,
            series_id: non_empty(self.series_id),
            units: non_empty(self.units),
            first_date: non_empty(self.first_date),
            aliases: self
                .aliases
                .into_iter()
                .filter_map(|alias| non_empty(Some(alias)))
                .collect(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load the catalog named by `MACRODATA_CATALOG`, or the built-in one.
pub fn load_default_catalog() -> Result<VariableCatalog> {
    match catalog_override() {
        Some(path) => load_catalog(&path),
        None => {
            debug!("using built-in variable catalog");
            parse_catalog(BUILTIN_CATALOG, "<built-in>")
        }
    }
}

/// Load a catalog from a TOML file.
pub fn load_catalog(path: &Path) -> Result<VariableCatalog> {
    let text = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    parse_catalog(&text, &path.display().to_string())
}

/// Parse catalog TOML. `origin` names the input in error messages.
pub fn parse_catalog(text: &str, origin: &str) -> Result<VariableCatalog> {
    let file: CatalogFile = toml::from_str(text).map_err(|source| CatalogError::Toml {
        origin: origin.to_string(),
        source,
    })?;
    let entries = file
        .variable
        .into_iter()
        .map(RawVariable::into_entry)
        .collect::<Result<Vec<_>>>()?;
    let catalog = VariableCatalog::from_entries(entries)?;
    info!(
        origin,
        variables = catalog.len(),
        "loaded variable catalog"
    );
    Ok(catalog)
}
