//! The JSON artifact shared by the generator and the lint rule.

use crate::SelectorListError;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fs;

/// `{"id": [...], "class": [...]}` as written by the generator.
///
/// Either array may be missing or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorArtifact {
    /// Forbidden element ids, without the leading `#`.
    #[serde(default)]
    pub id: Vec<String>,
    /// Forbidden class names, without the leading `.`.
    #[serde(default)]
    pub class: Vec<String>,
}

impl SelectorArtifact {
    /// Parses an artifact from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SelectorListError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to compact JSON.
    pub fn to_json(&self) -> Result<String, SelectorListError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reads an artifact file.
    pub fn read(path: &Utf8Path) -> Result<Self, SelectorListError> {
        let json = fs::read_to_string(path).map_err(|source| SelectorListError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json)
    }
}
