//! Tests for src/index/mod.rs - Index build and snapshots

use filelinker::fuzzy::{normalize, NormalizerVariant};
use filelinker::index::{Index, RawEntry, SNAPSHOT_VERSION};

#[test]
fn test_every_key_matches_normalizer() {
    let names = ["BlueBerry Kush.pdf", "3.5 Gram Vape.pdf", "___.pdf", "Sour-Diesel.PDF"];
    let index = Index::build(
        names.iter().map(|n| RawEntry::new(format!("coas/{}", n), *n)),
        NormalizerVariant::Slug,
    );
    assert_eq!(index.len(), names.len());
    for entry in index.entries() {
        assert_eq!(entry.key(), normalize(entry.name()));
    }
}

#[test]
fn test_sorted_by_path_bytes() {
    let index = Index::build(
        vec![
            RawEntry::new("coas/b.pdf", "b.pdf"),
            RawEntry::new("coas/B.pdf", "B.pdf"),
            RawEntry::new("coas/a.pdf", "a.pdf"),
        ],
        NormalizerVariant::Slug,
    );
    let paths: Vec<&str> = index.entries().iter().map(|e| e.path()).collect();
    assert_eq!(paths, vec!["coas/B.pdf", "coas/a.pdf", "coas/b.pdf"]);
}

#[test]
fn test_metadata() {
    let before = chrono::Utc::now();
    let index = Index::build(Vec::new(), NormalizerVariant::Strip).with_source("fs:/srv");
    assert!(index.built_at() >= before);
    assert_eq!(index.source(), "fs:/srv");
    assert_eq!(index.variant(), NormalizerVariant::Strip);
    assert!(index.is_empty());
}

#[test]
fn test_snapshot_is_lossless() {
    let index = Index::build(
        vec![
            RawEntry::new("coas/Blue Dream.pdf", "Blue Dream.pdf"),
            RawEntry::new("coas/Ünïcode Ñame.pdf", "Ünïcode Ñame.pdf"),
        ],
        NormalizerVariant::Slug,
    )
    .with_source("static");

    let decoded = Index::from_snapshot(&index.to_snapshot().unwrap()).unwrap();
    assert_eq!(decoded.entries(), index.entries());
    assert_eq!(decoded.built_at(), index.built_at());
    assert_eq!(decoded.source(), index.source());
    assert_eq!(decoded.variant(), index.variant());
}

#[test]
fn test_snapshot_carries_version() {
    let index = Index::build(Vec::new(), NormalizerVariant::Slug);
    let value: serde_json::Value = serde_json::from_slice(&index.to_snapshot().unwrap()).unwrap();
    assert_eq!(value["version"], SNAPSHOT_VERSION);
}
