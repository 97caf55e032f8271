//! Index of normalized catalog entries and its persisted snapshot form

use crate::error::{FlError, Result};
use crate::fuzzy::NormalizerVariant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Snapshot format version written by [`Index::to_snapshot`]
pub const SNAPSHOT_VERSION: u32 = 1;

/// A (path, name) pair produced by a source enumerator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub path: String,
    pub name: String,
}

impl RawEntry {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }
}

/// An indexed catalog entry with its canonical key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    path: String,
    #[serde(rename = "filename")]
    name: String,
    #[serde(rename = "normalized_name")]
    key: String,
}

impl IndexEntry {
    fn from_raw(raw: RawEntry, variant: NormalizerVariant) -> Self {
        let key = variant.normalize(&raw.name);
        Self {
            path: raw.path,
            name: raw.name,
            key,
        }
    }

    /// Path relative to the catalog root
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Original file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical key the entry is matched on
    pub fn key(&self) -> &str {
        &self.key
    }

    /// File name without its extension, for display
    pub fn label(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or(&self.name)
    }
}

/// Immutable set of entries built from one enumeration of a source.
///
/// Entries are ordered by path, ties keeping enumeration order. An index is
/// never edited after it is built; a rebuild produces a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    #[serde(rename = "version")]
    format_version: u32,
    built_at: DateTime<Utc>,
    source: String,
    normalizer: NormalizerVariant,
    entries: Vec<IndexEntry>,
}

impl Index {
    /// Normalize every raw entry and order the result by path
    pub fn build<I>(raw: I, variant: NormalizerVariant) -> Self
    where
        I: IntoIterator<Item = RawEntry>,
    {
        let mut entries: Vec<IndexEntry> = raw
            .into_iter()
            .map(|entry| IndexEntry::from_raw(entry, variant))
            .collect();
        // Stable, so duplicate paths stay in enumeration order
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        Self {
            format_version: SNAPSHOT_VERSION,
            built_at: Utc::now(),
            source: String::new(),
            normalizer: variant,
            entries,
        }
    }

    /// Attach a description of the source the index was built from
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Normalizer used for every key in this index
    pub fn variant(&self) -> NormalizerVariant {
        self.normalizer
    }

    /// Time elapsed since the index was built
    pub fn age(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.built_at)
    }

    /// Serialize for a persistence store
    pub fn to_snapshot(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a snapshot written by [`Index::to_snapshot`]
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self> {
        let index: Index = serde_json::from_slice(bytes)?;
        if index.format_version != SNAPSHOT_VERSION {
            return Err(FlError::Serialization(format!(
                "unsupported snapshot version {} (expected {})",
                index.format_version, SNAPSHOT_VERSION
            )));
        }
        Ok(index)
    }
}
