//! Error types for filelinker

use thiserror::Error;

/// Main error type for filelinker
#[derive(Debug, Error)]
pub enum FlError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to enumerate {source_desc} ({failed_paths} path(s) failed): {message}")]
    Enumeration {
        source_desc: String,
        failed_paths: usize,
        message: String,
    },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FlError {
    /// Whether the caller supplied bad input, as opposed to an operational failure
    pub fn is_validation(&self) -> bool {
        matches!(self, FlError::InvalidArgument(_))
    }

    /// Build an enumeration error for a whole source
    pub fn enumeration(
        source_desc: impl Into<String>,
        failed_paths: usize,
        message: impl Into<String>,
    ) -> Self {
        FlError::Enumeration {
            source_desc: source_desc.into(),
            failed_paths,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for FlError {
    fn from(e: serde_json::Error) -> Self {
        FlError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for FlError {
    fn from(e: serde_yaml::Error) -> Self {
        FlError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for FlError {
    fn from(e: toml::de::Error) -> Self {
        FlError::Config(e.to_string())
    }
}

/// Result type alias for filelinker
pub type Result<T> = std::result::Result<T, FlError>;
