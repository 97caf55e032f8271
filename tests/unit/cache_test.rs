//! Tests for src/cache/mod.rs - IndexCache lifecycle

use filelinker::cache::{CacheState, IndexCache, IndexStore, MemoryStore};
use filelinker::error::FlError;
use filelinker::index::Index;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[allow(dead_code)]
mod common {
    include!("../common/mod.rs");
}

use common::{entries_in, FlakyStore, SwitchableSource};

fn seeded_cache() -> IndexCache<SwitchableSource, MemoryStore> {
    let source = SwitchableSource::new(entries_in("coas", &["Blue Dream.pdf", "Sour Diesel.pdf"]));
    let cache = IndexCache::new(source, MemoryStore::new());
    cache.get(false).unwrap();
    cache
}

// ============================================================================
// State machine
// ============================================================================

#[test]
fn test_empty_to_built() {
    let cache = IndexCache::new(SwitchableSource::default(), MemoryStore::new());
    assert_eq!(cache.state(), CacheState::Empty);
    cache.get(false).unwrap();
    assert_eq!(cache.state(), CacheState::Built);
}

#[test]
fn test_built_to_stale_to_built() {
    let cache = seeded_cache();
    cache.invalidate().unwrap();
    assert_eq!(cache.state(), CacheState::Stale);
    cache.get(false).unwrap();
    assert_eq!(cache.state(), CacheState::Built);
    assert_eq!(cache.source().calls(), 2);
}

#[test]
fn test_external_stale_signal() {
    let cache = seeded_cache();
    cache.source().set_entries(entries_in("coas", &["New.pdf"]));
    cache.mark_stale();
    let index = cache.get(false).unwrap();
    assert_eq!(index.entries()[0].name(), "New.pdf");
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn test_rebuild_failure_preserves_prior_state() {
    let cache = seeded_cache();
    let before = cache.get(false).unwrap();
    let persisted = cache.store().load().unwrap();

    cache.source().fail(true);
    let err = cache.get(true).unwrap_err();
    assert!(matches!(err, FlError::Enumeration { .. }));

    assert_eq!(cache.state(), CacheState::Built);
    assert_eq!(cache.store().load().unwrap(), persisted);
    let after = cache.get(false).unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    let names: Vec<&str> = after.entries().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["Blue Dream.pdf", "Sour Diesel.pdf"]);
}

#[test]
fn test_rebuild_failure_after_invalidate_stays_stale() {
    let cache = seeded_cache();
    cache.invalidate().unwrap();
    cache.source().fail(true);
    assert!(cache.get(false).is_err());
    assert_eq!(cache.state(), CacheState::Stale);
    assert!(cache.store().is_empty());
}

#[test]
fn test_persistence_failure_reported_not_hidden() {
    let source = SwitchableSource::new(entries_in("coas", &["a.pdf"]));
    let store = FlakyStore::default();
    store.failing_saves.store(true, Ordering::SeqCst);
    let cache = IndexCache::new(source, store);

    let err = cache.get(false).unwrap_err();
    assert!(matches!(err, FlError::Persistence(_)));
    assert!(cache.store().load().unwrap().is_none());

    // The built index is still served in-process
    assert_eq!(cache.get(false).unwrap().len(), 1);
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_rebuild_replaces_rather_than_merges() {
    let cache = seeded_cache();
    cache.source().set_entries(entries_in("coas", &["Only.pdf"]));
    cache.get(true).unwrap();

    let bytes = cache.store().load().unwrap().unwrap();
    let persisted = Index::from_snapshot(&bytes).unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted.entries()[0].name(), "Only.pdf");
}

#[test]
fn test_second_cache_reads_first_cache_snapshot() {
    let store = MemoryStore::new();
    {
        let cache = IndexCache::new(
            SwitchableSource::new(entries_in("coas", &["a.pdf", "b.pdf"])),
            &store,
        );
        cache.get(false).unwrap();
    }

    let fresh = IndexCache::new(SwitchableSource::default(), &store);
    assert_eq!(fresh.get(false).unwrap().len(), 2);
    assert_eq!(fresh.source().calls(), 0);
}
