//! Application configuration for filelinker

use crate::cache::CacheOptions;
use crate::error::{FlError, Result};
use crate::fuzzy::{NormalizerVariant, DEFAULT_THRESHOLD};
use crate::source::DirectorySource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration stored in ~/.filelinker/config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root of the catalog; the current directory when unset
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    /// Directories under `base_dir` to index; empty indexes `base_dir` itself
    #[serde(default)]
    pub directories: Vec<String>,

    /// File extensions to index
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Minimum similarity for a match
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Normalizer used for both indexing and queries
    #[serde(default)]
    pub normalizer: NormalizerVariant,

    /// Where the index snapshot is persisted
    #[serde(default)]
    pub index_path: Option<PathBuf>,

    /// Seconds before a persisted index is rebuilt; never when unset
    #[serde(default)]
    pub cache_ttl: Option<u64>,

    /// Whether to use colors
    #[serde(default = "default_true")]
    pub colors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            directories: Vec::new(),
            extensions: default_extensions(),
            threshold: default_threshold(),
            normalizer: NormalizerVariant::default(),
            index_path: None,
            cache_ttl: None,
            colors: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_extensions() -> Vec<String> {
    vec!["pdf".to_string()]
}

impl AppConfig {
    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=100.0).contains(&self.threshold) {
            return Err(FlError::Config(format!(
                "threshold must be between 0 and 100, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Catalog root, falling back to the current directory
    pub fn base_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Snapshot location, falling back to ~/.filelinker/index.json
    pub fn index_path(&self) -> Result<PathBuf> {
        match &self.index_path {
            Some(path) => Ok(path.clone()),
            None => config_dir().map(|d| d.join("index.json")),
        }
    }

    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            variant: self.normalizer,
            max_age: self.cache_ttl.map(Duration::from_secs),
        }
    }

    pub fn directory_source(&self) -> Result<DirectorySource> {
        Ok(DirectorySource::new(self.base_dir()?)
            .with_directories(self.directories.iter().cloned())
            .with_extensions(&self.extensions))
    }
}

/// Get the filelinker config directory (~/.filelinker)
pub fn config_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|h| h.join(".filelinker"))
        .ok_or_else(|| FlError::Config("Could not determine home directory".to_string()))
}

/// Load configuration from `path`, or ~/.filelinker/config.toml.
/// A missing default file yields the defaults; a missing explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (config_dir()?.join("config.toml"), false),
    };

    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        AppConfig::from_toml(&content)
    } else if explicit {
        Err(FlError::Config(format!(
            "config file not found: {}",
            path.display()
        )))
    } else {
        Ok(AppConfig::default())
    }
}
