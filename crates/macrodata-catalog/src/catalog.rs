use std::collections::{BTreeMap, HashMap};

use macrodata_model::{DataSource, VariableEntry};

use crate::error::{CatalogError, Result};

/// Read-only set of variable definitions in declaration order.
///
/// Codes are unique, compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct VariableCatalog {
    entries: Vec<VariableEntry>,
    by_code: HashMap<String, usize>,
}

impl VariableCatalog {
    /// Build a catalog, rejecting empty codes or names and duplicate codes.
    pub fn from_entries(entries: Vec<VariableEntry>) -> Result<Self> {
        let mut by_code = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.code.trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    index,
                    field: "code",
                });
            }
            if entry.display_name.trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    index,
                    field: "display_name",
                });
            }
            let key = entry.code.trim().to_lowercase();
            if by_code.insert(key, index).is_some() {
                return Err(CatalogError::DuplicateCode {
                    code: entry.code.clone(),
                });
            }
        }
        Ok(Self { entries, by_code })
    }

    pub fn entries(&self) -> &[VariableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by code, ignoring case.
    pub fn get(&self, code: &str) -> Option<&VariableEntry> {
        self.by_code
            .get(&code.trim().to_lowercase())
            .map(|&index| &self.entries[index])
    }

    /// Entries belonging to `source`, in declaration order.
    pub fn filter_by_source(&self, source: DataSource) -> Vec<&VariableEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.source == source)
            .collect()
    }

    /// Number of entries per source. Sources without entries are omitted.
    pub fn sources(&self) -> BTreeMap<DataSource, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.source).or_insert(0) += 1;
        }
        counts
    }
}
