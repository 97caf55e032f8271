//! Index cache with a build, invalidate and rebuild lifecycle

mod store;

pub use store::{FileStore, IndexStore, MemoryStore};

use crate::error::Result;
use crate::fuzzy::NormalizerVariant;
use crate::index::Index;
use crate::source::{ScanIssue, SourceEnumerator};
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Lifecycle of the published snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    /// Nothing published yet
    Empty,
    /// A snapshot is published and current
    Built,
    /// Invalidated or marked stale; the next `get` rebuilds
    Stale,
}

/// How snapshots are built and when a persisted one is reused
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheOptions {
    pub variant: NormalizerVariant,
    /// Persisted snapshots older than this are rebuilt
    pub max_age: Option<Duration>,
}

/// Outcome of a successful rebuild
#[derive(Debug, Clone)]
pub struct RebuildReport {
    pub index: Arc<Index>,
    /// Paths skipped while enumerating
    pub issues: Vec<ScanIssue>,
}

impl RebuildReport {
    pub fn entry_count(&self) -> usize {
        self.index.len()
    }
}

/// Owns the current [`Index`] snapshot.
///
/// Readers get an `Arc<Index>` that stays valid across later rebuilds. A
/// rebuild enumerates the source, builds a new index off to the side,
/// persists it and then publishes it in one swap; on enumeration failure
/// nothing is persisted or published.
pub struct IndexCache<E, S> {
    source: E,
    store: S,
    options: CacheOptions,
    snapshot: ArcSwapOption<Index>,
    stale: AtomicBool,
    /// Serializes rebuilds, loads and invalidations
    write_lock: Mutex<()>,
}

impl<E: SourceEnumerator, S: IndexStore> IndexCache<E, S> {
    pub fn new(source: E, store: S) -> Self {
        Self::with_options(source, store, CacheOptions::default())
    }

    pub fn with_options(source: E, store: S, options: CacheOptions) -> Self {
        Self {
            source,
            store,
            options,
            snapshot: ArcSwapOption::empty(),
            stale: AtomicBool::new(false),
            write_lock: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &E {
        &self.source
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// Current index, rebuilding when forced, stale, or nothing usable is
    /// persisted.
    pub fn get(&self, force_refresh: bool) -> Result<Arc<Index>> {
        if !force_refresh && !self.is_stale() {
            if let Some(index) = self.current()? {
                return Ok(index);
            }
        }

        let _guard = self.write_lock.lock();
        // Another caller may have rebuilt while we waited
        if !force_refresh && !self.is_stale() {
            if let Some(index) = self.fresh_snapshot() {
                return Ok(index);
            }
        }
        self.rebuild_locked().map(|report| report.index)
    }

    /// Published or persisted index, without enumerating the source
    pub fn current(&self) -> Result<Option<Arc<Index>>> {
        if let Some(index) = self.fresh_snapshot() {
            return Ok(Some(index));
        }

        let _guard = self.write_lock.lock();
        // A rebuild may have published while we waited
        if let Some(index) = self.fresh_snapshot() {
            return Ok(Some(index));
        }

        let bytes = match self.store.load() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("no persisted index");
                return Ok(None);
            }
            Err(e) => {
                warn!("ignoring persisted index that cannot be read: {}", e);
                return Ok(None);
            }
        };
        let index = match Index::from_snapshot(&bytes) {
            Ok(index) => index,
            Err(e) => {
                warn!("ignoring unreadable persisted index: {}", e);
                return Ok(None);
            }
        };
        if !self.is_fresh(&index) {
            debug!(built_at = %index.built_at(), "persisted index is out of date");
            return Ok(None);
        }

        let index = Arc::new(index);
        self.snapshot.store(Some(Arc::clone(&index)));
        debug!(entries = index.len(), "loaded persisted index");
        Ok(Some(index))
    }

    /// Published snapshot, if any, with no I/O and no freshness check
    pub fn peek(&self) -> Option<Arc<Index>> {
        self.snapshot.load_full()
    }

    /// Enumerate, build, persist and publish a new index.
    ///
    /// Enumeration failures leave the persisted and published state as they
    /// were. If persisting fails the new index is still published for this
    /// process but the error is returned.
    pub fn rebuild(&self) -> Result<RebuildReport> {
        let _guard = self.write_lock.lock();
        self.rebuild_locked()
    }

    /// Caller must hold `write_lock`
    fn rebuild_locked(&self) -> Result<RebuildReport> {
        let enumeration = self.source.enumerate()?;
        for issue in &enumeration.issues {
            warn!("skipped {}", issue);
        }

        let index = Index::build(enumeration.entries, self.options.variant)
            .with_source(self.source.describe());
        let snapshot = index.to_snapshot()?;
        let index = Arc::new(index);

        let saved = self.store.save(&snapshot);
        self.snapshot.store(Some(Arc::clone(&index)));
        self.stale.store(false, Ordering::Release);

        match saved {
            Ok(()) => {
                info!(
                    entries = index.len(),
                    skipped = enumeration.issues.len(),
                    "rebuilt index from {}",
                    index.source()
                );
                Ok(RebuildReport {
                    index,
                    issues: enumeration.issues,
                })
            }
            Err(e) => {
                warn!("index rebuilt but not persisted: {}", e);
                Err(e)
            }
        }
    }

    /// Clear the persisted snapshot; the next `get` rebuilds.
    /// Returns whether there was anything to clear.
    pub fn invalidate(&self) -> Result<bool> {
        let _guard = self.write_lock.lock();
        let cleared = self.store.clear()?;
        let had_snapshot = self.snapshot.swap(None).is_some();
        self.stale.store(true, Ordering::Release);
        info!("index invalidated");
        Ok(cleared || had_snapshot)
    }

    /// Flag the published snapshot as out of date without discarding it
    pub fn mark_stale(&self) {
        self.stale.store(true, Ordering::Release);
    }

    pub fn state(&self) -> CacheState {
        if self.is_stale() {
            CacheState::Stale
        } else if self.snapshot.load().is_some() {
            CacheState::Built
        } else {
            CacheState::Empty
        }
    }

    fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    fn fresh_snapshot(&self) -> Option<Arc<Index>> {
        self.snapshot
            .load_full()
            .filter(|index| self.is_fresh(index))
    }

    fn is_fresh(&self, index: &Index) -> bool {
        if index.variant() != self.options.variant {
            return false;
        }
        match self.options.max_age.and_then(|max| chrono::Duration::from_std(max).ok()) {
            Some(max_age) => index.age() <= max_age,
            None => true,
        }
    }
}
