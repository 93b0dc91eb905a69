//! Catalog location resolution.

use std::path::PathBuf;

/// Environment variable pointing at a catalog TOML file that replaces the
/// built-in catalog.
pub const CATALOG_ENV_VAR: &str = "MACRODATA_CATALOG";

/// Path of the catalog override, if one is configured.
///
/// An empty value is treated as unset.
pub fn catalog_override() -> Option<PathBuf> {
    std::env::var_os(CATALOG_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
