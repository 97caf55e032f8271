//! Sources of raw catalog entries

mod fs;

pub use fs::DirectorySource;

use crate::error::Result;
use crate::index::RawEntry;
use serde::Serialize;
use std::fmt;

/// A path that could not be enumerated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanIssue {
    pub path: String,
    pub message: String,
}

impl ScanIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Entries produced by one enumeration, with the paths that were skipped
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    pub entries: Vec<RawEntry>,
    pub issues: Vec<ScanIssue>,
}

impl Enumeration {
    pub fn new(entries: Vec<RawEntry>) -> Self {
        Self {
            entries,
            issues: Vec::new(),
        }
    }
}

/// Supplies the raw entries an index is built from.
///
/// An `Err` means the source as a whole could not be read. Individual bad
/// paths are reported in [`Enumeration::issues`] instead.
pub trait SourceEnumerator: Send + Sync {
    fn enumerate(&self) -> Result<Enumeration>;

    /// Human readable description stored with the index
    fn describe(&self) -> String;
}

/// A fixed list of entries
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    entries: Vec<RawEntry>,
}

impl StaticSource {
    pub fn new(entries: Vec<RawEntry>) -> Self {
        Self { entries }
    }
}

impl SourceEnumerator for StaticSource {
    fn enumerate(&self) -> Result<Enumeration> {
        Ok(Enumeration::new(self.entries.clone()))
    }

    fn describe(&self) -> String {
        format!("static:{} entries", self.entries.len())
    }
}
