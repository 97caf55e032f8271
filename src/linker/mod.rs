//! Resolver and admin operations over a cached index

use crate::cache::{FileStore, IndexCache, IndexStore, RebuildReport};
use crate::config::AppConfig;
use crate::error::Result;
use crate::fuzzy::{self, MatchResult};
use crate::source::{DirectorySource, SourceEnumerator};

/// Linker over a directory tree with a file-backed snapshot
pub type FsLinker = Linker<DirectorySource, FileStore>;

/// Resolves queries against the cache's current index
pub struct Linker<E, S> {
    cache: IndexCache<E, S>,
    threshold: f64,
}

impl FsLinker {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let cache = IndexCache::with_options(
            config.directory_source()?,
            FileStore::new(config.index_path()?),
            config.cache_options(),
        );
        Ok(Linker::new(cache, config.threshold))
    }
}

impl<E: SourceEnumerator, S: IndexStore> Linker<E, S> {
    pub fn new(cache: IndexCache<E, S>, threshold: f64) -> Self {
        Self { cache, threshold }
    }

    pub fn cache(&self) -> &IndexCache<E, S> {
        &self.cache
    }

    /// Default threshold used by [`Linker::resolve`]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn resolve(&self, query: &str) -> Result<Option<MatchResult>> {
        self.resolve_with(query, self.threshold)
    }

    /// Best match at or above `threshold`. The query and threshold are
    /// validated before the index is touched.
    pub fn resolve_with(&self, query: &str, threshold: f64) -> Result<Option<MatchResult>> {
        fuzzy::validate_query(query)?;
        fuzzy::validate_threshold(threshold)?;
        let index = self.cache.get(false)?;
        fuzzy::resolve(query, &index, threshold)
    }

    /// First indexed entry whose key contains the normalized query
    pub fn find_containing(&self, query: &str) -> Result<Option<MatchResult>> {
        fuzzy::validate_query(query)?;
        let index = self.cache.get(false)?;
        fuzzy::find_containing(query, &index)
    }

    pub fn rebuild_index(&self) -> Result<RebuildReport> {
        self.cache.rebuild()
    }

    pub fn invalidate_index(&self) -> Result<bool> {
        self.cache.invalidate()
    }

    /// Entry count of the current index, `None` when nothing is indexed yet
    pub fn index_size(&self) -> Result<Option<usize>> {
        Ok(self.cache.current()?.map(|index| index.len()))
    }
}
