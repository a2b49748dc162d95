//! On-disk document shape and the conversions to and from the live map.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Version stamped into every file this crate writes.
pub const CURRENT_VERSION: &str = "1.0";

/// One key/value pair as it appears in the file.
///
/// Deserialize names are lowercase because the serializer folds property
/// names before decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Entry key.
    #[serde(rename(serialize = "Key", deserialize = "key"))]
    pub key: String,
    /// Entry value; typed values hold their JSON text here.
    #[serde(rename(serialize = "Value", deserialize = "value"))]
    pub value: String,
}

/// The whole config file: a version tag plus a list of entries.
///
/// ```json
/// { "ConfigVersion": "1.0", "Entries": [ { "Key": "theme", "Value": "dark" } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Version the file was written with. Missing reads as `""`.
    #[serde(
        rename(serialize = "ConfigVersion", deserialize = "configversion"),
        default
    )]
    pub version: String,
    /// Stored entries.
    #[serde(rename(serialize = "Entries", deserialize = "entries"), default)]
    pub entries: Vec<ConfigEntry>,
}

impl ConfigDocument {
    /// Empty document at [`CURRENT_VERSION`].
    pub fn new() -> Self {
        Self {
            version: CURRENT_VERSION.to_owned(),
            entries: Vec::new(),
        }
    }

    /// `true` when the document carries [`CURRENT_VERSION`].
    pub fn is_current(&self) -> bool {
        self.version == CURRENT_VERSION
    }

    /// The version gate. Passes when the version matches or when mismatches
    /// are allowed.
    pub fn check_version(&self, allow_mismatch: bool) -> Result<()> {
        if self.is_current() || allow_mismatch {
            return Ok(());
        }
        Err(Error::VersionMismatch {
            expected: CURRENT_VERSION.to_owned(),
            found: self.version.clone(),
        })
    }
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a document from map entries. Entries are sorted by key so the same
/// map always produces the same file.
pub fn to_document<I>(entries: I, version: &str) -> ConfigDocument
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut entries: Vec<ConfigEntry> = entries
        .into_iter()
        .map(|(key, value)| ConfigEntry { key, value })
        .collect();
    entries.sort_by(|a, b| a.key.cmp(&b.key));
    ConfigDocument {
        version: version.to_owned(),
        entries,
    }
}

/// Flatten a document into a map. On duplicate keys the later entry wins.
pub fn to_mapping(document: ConfigDocument) -> HashMap<String, String> {
    document
        .entries
        .into_iter()
        .map(|entry| (entry.key, entry.value))
        .collect()
}
