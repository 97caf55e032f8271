//! Persistence for index snapshots

use crate::error::{FlError, Result};
use parking_lot::Mutex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage for a single serialized snapshot. `Ok(None)` from `load` means
/// nothing has been saved.
pub trait IndexStore: Send + Sync {
    fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replace whatever was stored before
    fn save(&self, snapshot: &[u8]) -> Result<()>;

    /// Remove the stored snapshot, returning whether one existed
    fn clear(&self) -> Result<bool>;
}

impl<T: IndexStore + ?Sized> IndexStore for &T {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        (**self).load()
    }

    fn save(&self, snapshot: &[u8]) -> Result<()> {
        (**self).save(snapshot)
    }

    fn clear(&self) -> Result<bool> {
        (**self).clear()
    }
}

impl<T: IndexStore + ?Sized> IndexStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        (**self).load()
    }

    fn save(&self, snapshot: &[u8]) -> Result<()> {
        (**self).save(snapshot)
    }

    fn clear(&self) -> Result<bool> {
        (**self).clear()
    }
}

/// Snapshot kept in a file, replaced via a temporary sibling and a rename
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn error(&self, action: &str, e: std::io::Error) -> FlError {
        FlError::Persistence(format!(
            "failed to {} {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}

impl IndexStore for FileStore {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.error("read", e)),
        }
    }

    fn save(&self, snapshot: &[u8]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| self.error("create directory for", e))?;
        }
        let tmp = self.temp_path();
        std::fs::write(&tmp, snapshot).map_err(|e| self.error("write", e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            self.error("replace", e)
        })
    }

    fn clear(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.error("remove", e)),
        }
    }
}

/// In-process store, mostly for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().is_none()
    }
}

impl IndexStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, snapshot: &[u8]) -> Result<()> {
        *self.slot.lock() = Some(snapshot.to_vec());
        Ok(())
    }

    fn clear(&self) -> Result<bool> {
        Ok(self.slot.lock().take().is_some())
    }
}
