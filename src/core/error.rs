//! Error types for treeignore

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for treeignore operations
///
/// A walk itself never fails: entry and rule-file failures are logged and
/// counted by the walker. These variants surface from the outer layers
/// (configuration, root validation, the CLI) and from [`TreeSource`]
/// implementations before the walker swallows them.
///
/// [`TreeSource`]: crate::ignore::tree::TreeSource
#[derive(Error, Debug)]
pub enum TreeIgnoreError {
    /// Traversal errors
    #[error("Failed to visit {path}: {source}")]
    EntryVisit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read rule file {path}: {source}")]
    RuleFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root validation errors
    #[error("Root directory not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Root is not a directory: {path}")]
    RootNotDirectory { path: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TreeIgnoreError {
    /// Create a new entry visit error
    pub fn entry_visit(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::EntryVisit {
            path: path.into(),
            source,
        }
    }

    /// Create a new rule file read error
    pub fn rule_file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::RuleFileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }

    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::EntryVisit { path, .. }
            | Self::RuleFileRead { path, .. }
            | Self::RootNotFound { path }
            | Self::RootNotDirectory { path } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for treeignore operations
pub type Result<T> = std::result::Result<T, TreeIgnoreError>;
