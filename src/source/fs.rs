//! Recursive directory source

use super::{Enumeration, ScanIssue, SourceEnumerator};
use crate::error::{FlError, Result};
use crate::index::RawEntry;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Walks selected directories under a base directory.
///
/// Paths are reported relative to the base, `/`-separated. With no
/// directories selected the base itself is walked.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    base: PathBuf,
    directories: Vec<String>,
    extensions: Vec<String>,
}

impl DirectorySource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            directories: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// Restrict the walk to these directories, relative to the base
    pub fn with_directories<I, S>(mut self, directories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directories = directories.into_iter().map(Into::into).collect();
        self
    }

    /// Only keep files with one of these extensions (case-insensitive).
    /// An empty list keeps every file.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            })
            .unwrap_or(false)
    }

    fn roots(&self) -> Vec<(String, PathBuf)> {
        if self.directories.is_empty() {
            return vec![(".".to_string(), self.base.clone())];
        }
        self.directories
            .iter()
            .map(|dir| (dir.clone(), self.base.join(dir.trim_matches('/'))))
            .collect()
    }

    /// Walk one root. Returns false if the root itself is unusable.
    fn scan_root(&self, label: &str, root: &Path, out: &mut Enumeration) -> bool {
        if escapes_base(label) {
            out.issues.push(ScanIssue::new(label, "Outside base directory"));
            return false;
        }
        if !root.is_dir() {
            out.issues.push(ScanIssue::new(label, "Directory not found"));
            return false;
        }
        if let Err(e) = std::fs::read_dir(root) {
            out.issues
                .push(ScanIssue::new(label, format!("Directory not readable: {}", e)));
            return false;
        }

        for entry in WalkDir::new(root).min_depth(1).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| self.display_path(p))
                        .unwrap_or_else(|| label.to_string());
                    out.issues.push(ScanIssue::new(path, e.to_string()));
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.accepts(entry.path()) {
                continue;
            }

            match (self.relative_path(entry.path()), entry.file_name().to_str()) {
                (Some(path), Some(name)) => out.entries.push(RawEntry::new(path, name)),
                _ => out.issues.push(ScanIssue::new(
                    self.display_path(entry.path()),
                    "File name is not valid UTF-8",
                )),
            }
        }
        true
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.base).ok()?;
        let parts: Option<Vec<&str>> = rel
            .components()
            .map(|c| match c {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect();
        parts.map(|parts| parts.join("/"))
    }

    fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.base)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

/// Whether a selected directory climbs out of the base with `..`.
/// Surrounding slashes are ignored, as in `roots`.
fn escapes_base(dir: &str) -> bool {
    Path::new(dir.trim_matches('/'))
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
}

impl SourceEnumerator for DirectorySource {
    fn enumerate(&self) -> Result<Enumeration> {
        if !self.base.is_dir() {
            return Err(FlError::enumeration(
                self.describe(),
                1,
                format!("base directory not found: {}", self.base.display()),
            ));
        }

        let roots = self.roots();
        let mut out = Enumeration::default();
        let mut failed = 0;
        for (label, root) in &roots {
            if !self.scan_root(label, root, &mut out) {
                failed += 1;
            }
        }

        if failed == roots.len() {
            let message = out
                .issues
                .iter()
                .map(ScanIssue::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(FlError::enumeration(self.describe(), failed, message));
        }

        debug!(
            entries = out.entries.len(),
            issues = out.issues.len(),
            "enumerated {}",
            self.base.display()
        );
        Ok(out)
    }

    fn describe(&self) -> String {
        if self.directories.is_empty() {
            format!("fs:{}", self.base.display())
        } else {
            format!("fs:{} [{}]", self.base.display(), self.directories.join(", "))
        }
    }
}
