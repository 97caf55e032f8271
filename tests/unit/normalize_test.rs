//! Tests for src/fuzzy/normalize.rs - normalize, NormalizerVariant

use filelinker::fuzzy::{normalize, NormalizerVariant};
use proptest::prelude::*;

// ============================================================================
// Slug variant
// ============================================================================

#[test]
fn test_product_title_example() {
    assert_eq!(
        normalize("3.5 Gram THCA Disposable Vape (Limited Run) – Pressure.pdf"),
        "3-5-gram-thca-disposable-vape-limited-run-pressure"
    );
}

#[test]
fn test_camel_case_boundary() {
    assert_eq!(normalize("BlueBerry"), "blue-berry");
    assert_eq!(normalize("GrapeApeOG.pdf"), "grape-ape-og");
}

#[test]
fn test_extension_removed_once() {
    assert_eq!(normalize("lab.results.PDF"), "lab-results");
}

#[test]
fn test_digits_kept() {
    assert_eq!(normalize("Batch_042-v2.pdf"), "batch-042-v2");
}

#[test]
fn test_default_variant_is_slug() {
    assert_eq!(NormalizerVariant::default(), NormalizerVariant::Slug);
    assert_eq!(
        NormalizerVariant::Slug.normalize("My File_1.pdf"),
        normalize("My File_1.pdf")
    );
}

// ============================================================================
// Strip variant
// ============================================================================

#[test]
fn test_strip_removes_separators_without_replacement() {
    let v = NormalizerVariant::Strip;
    assert_eq!(v.normalize("Blue Berry-Kush_2.pdf"), "blueberrykush2");
}

#[test]
fn test_strip_keeps_other_punctuation() {
    let v = NormalizerVariant::Strip;
    assert_eq!(v.normalize("Kush (Batch 2).pdf"), "kush(batch2)");
}

#[test]
fn test_variant_display() {
    assert_eq!(NormalizerVariant::Slug.to_string(), "slug");
    assert_eq!(NormalizerVariant::Strip.to_string(), "strip");
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_slug_idempotent(raw in "\\PC{0,40}") {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn prop_slug_alphabet(raw in "\\PC{0,40}") {
        let key = normalize(&raw);
        prop_assert!(key.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-'));
        prop_assert!(!key.starts_with('-'));
        prop_assert!(!key.ends_with('-'));
        prop_assert!(!key.contains("--"));
    }

    #[test]
    fn prop_case_insensitive(raw in "[a-z0-9 ._-]{0,30}") {
        // Without lowercase-to-uppercase transitions casing cannot matter
        prop_assert_eq!(normalize(&raw.to_ascii_uppercase()), normalize(&raw));
    }
}
