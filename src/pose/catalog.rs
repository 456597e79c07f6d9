use std::path::Path;

use anyhow::Context as _;
use serde_json::{Map, Value};

use crate::foundation::error::{PoseDistError, PoseDistResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Capture format family of an entry. Selects the record fields and frame files.
pub enum EntryType {
    /// `v` records with JPEG frames.
    Compact,
    /// `v`/`h`/`e` records with WebP frames.
    Extended,
    /// `vectors` records with JPEG frames. Unknown type tags land here.
    #[default]
    #[serde(other)]
    Legacy,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Catalog metadata for one named entry.
pub struct CatalogEntry {
    /// Human-readable title, used for logging.
    #[serde(default)]
    pub title: String,
    /// Capture format family.
    #[serde(rename = "type", default)]
    pub kind: EntryType,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Ordered mapping of entry name to [`CatalogEntry`].
pub struct Catalog {
    entries: Vec<(String, CatalogEntry)>,
}

impl Catalog {
    /// Build a catalog from already-ordered entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, CatalogEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parse a catalog JSON object, keeping its key order. An empty object is rejected.
    pub fn from_json_str(json: &str) -> PoseDistResult<Self> {
        let raw: Map<String, Value> = serde_json::from_str(json)
            .map_err(|e| PoseDistError::validation(format!("parse catalog JSON: {e}")))?;
        if raw.is_empty() {
            return Err(PoseDistError::validation("catalog is empty"));
        }

        let mut entries = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let entry: CatalogEntry = serde_json::from_value(value).map_err(|e| {
                PoseDistError::validation(format!("catalog entry '{name}': {e}"))
            })?;
            entries.push((name, entry));
        }
        Ok(Self { entries })
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: &Path) -> PoseDistResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Look up one entry by name.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entry)| entry)
    }

    /// Keep only the named entries, preserving catalog order.
    pub fn retain_names(&mut self, names: &[String]) {
        self.entries.retain(|(n, _)| names.contains(n));
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pose/catalog.rs"]
mod tests;
