//! Fuzzy matching of queries against an index

mod normalize;
mod similarity;

pub use normalize::{normalize, NormalizerVariant, SEPARATOR};
pub use similarity::{common_substring, matched_chars, similarity, CommonSubstring};

use crate::error::{FlError, Result};
use crate::index::{Index, IndexEntry};
use serde::Serialize;
use tracing::debug;

/// Default minimum similarity for a match
pub const DEFAULT_THRESHOLD: f64 = 50.0;

/// Best entry for a query and its similarity score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub entry: IndexEntry,
    pub score: f64,
}

/// Reject queries that are empty after trimming
pub fn validate_query(query: &str) -> Result<&str> {
    if query.trim().is_empty() {
        return Err(FlError::InvalidArgument("query must not be empty".to_string()));
    }
    Ok(query)
}

/// Reject thresholds outside `0..=100`, NaN included
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if !(0.0..=100.0).contains(&threshold) {
        return Err(FlError::InvalidArgument(format!(
            "threshold must be between 0 and 100, got {}",
            threshold
        )));
    }
    Ok(threshold)
}

/// Pick the entry whose key is most similar to the normalized query.
///
/// Only scores `>= threshold` are eligible. When several entries share the
/// highest score the first in index order is returned. `Ok(None)` means
/// nothing reached the threshold, including when the index is empty.
pub fn resolve(query: &str, index: &Index, threshold: f64) -> Result<Option<MatchResult>> {
    let query = validate_query(query)?;
    let threshold = validate_threshold(threshold)?;

    if index.is_empty() {
        debug!("index is empty, nothing to match '{}' against", query);
        return Ok(None);
    }

    let key = index.variant().normalize(query);
    let mut best: Option<(&IndexEntry, f64)> = None;

    for entry in index.entries() {
        let score = similarity(&key, entry.key());
        if score < threshold {
            continue;
        }
        // Strictly greater: an equal score never displaces an earlier entry
        if best.map_or(true, |(_, highest)| score > highest) {
            best = Some((entry, score));
        }
    }

    match best {
        Some((entry, score)) => {
            debug!(query = %key, path = entry.path(), score, "resolved");
            Ok(Some(MatchResult {
                entry: entry.clone(),
                score,
            }))
        }
        None => {
            debug!(query = %key, threshold, entries = index.len(), "no match");
            Ok(None)
        }
    }
}

/// First entry in index order whose key contains the normalized query
pub fn find_containing(query: &str, index: &Index) -> Result<Option<MatchResult>> {
    let query = validate_query(query)?;
    let key = index.variant().normalize(query);
    if key.is_empty() {
        return Ok(None);
    }

    Ok(index
        .entries()
        .iter()
        .find(|entry| entry.key().contains(key.as_str()))
        .map(|entry| MatchResult {
            score: similarity(&key, entry.key()),
            entry: entry.clone(),
        }))
}
