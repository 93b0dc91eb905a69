//! Variable catalog: the static set of known FRED and Greenbook/Tealbook
//! variables that queries are resolved against.

#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod loader;
pub mod paths;

pub use crate::catalog::VariableCatalog;
pub use crate::error::{CatalogError, Result};
pub use crate::loader::{BUILTIN_CATALOG, load_catalog, load_default_catalog, parse_catalog};
pub use crate::paths::{CATALOG_ENV_VAR, catalog_override};
