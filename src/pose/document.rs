use serde_json::{Map, Value};

use crate::foundation::error::{PoseDistError, PoseDistResult};

/// Document-level keys never carried into the distribution format.
///
/// Both spellings of the landmark-mapping table occur in archived captures.
pub const DROPPED_DOCUMENT_KEYS: &[&str] = &["poseLandmarkMapppings", "poseLandmarkMappings"];

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One time-indexed sample of a pose capture.
pub struct PoseRecord {
    /// Capture timestamp. Non-decreasing across a document, not necessarily unique.
    pub t: i64,
    /// Every other field of the record, in document order.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PoseRecord {
    /// Copy of this record keeping `t` plus the `allowed` fields that are present.
    pub fn narrowed(&self, allowed: &[&str]) -> Self {
        let fields = self
            .fields
            .iter()
            .filter(|(key, _)| allowed.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Self { t: self.t, fields }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A parsed pose capture document as stored in an archive.
pub struct PoseDocument {
    /// Document-level metadata, in document order.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
    /// Records in capture order.
    pub poses: Vec<PoseRecord>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// The narrowed document written to the distribution tree.
pub struct DistributionDocument {
    /// Metadata minus [`DROPPED_DOCUMENT_KEYS`].
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
    /// Records reduced to their allow-listed fields, same order and count as the input.
    pub poses: Vec<PoseRecord>,
}

impl PoseDocument {
    /// Parse a document from JSON text.
    pub fn from_json_str(json: &str) -> PoseDistResult<Self> {
        serde_json::from_str(json).map_err(|e| PoseDistError::malformed(e.to_string()))
    }

    /// Build the distribution form without touching `self`.
    ///
    /// Records keep `t` and those of `allowed` they carry; nothing is reordered,
    /// added or removed.
    pub fn shrink(&self, allowed: &[&str]) -> DistributionDocument {
        let metadata = self
            .metadata
            .iter()
            .filter(|(key, _)| !DROPPED_DOCUMENT_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let poses = self.poses.iter().map(|r| r.narrowed(allowed)).collect();
        DistributionDocument { metadata, poses }
    }
}

impl DistributionDocument {
    /// Pretty-printed JSON (two-space indent).
    pub fn to_json_pretty(&self) -> PoseDistResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PoseDistError::Other(anyhow::Error::new(e).context("serialize document")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pose/document.rs"]
mod tests;
