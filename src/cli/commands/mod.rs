//! CLI command implementations

pub mod check;
pub mod completion;
pub mod scan;

// Common utilities for commands
use crate::config::ScanConfig;
use crate::core::error::TreeIgnoreError;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Canonical form of a walk root, which must be an existing directory
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    if !root.exists() {
        return Err(TreeIgnoreError::RootNotFound {
            path: root.to_path_buf(),
        }
        .into());
    }
    if !root.is_dir() {
        return Err(TreeIgnoreError::RootNotDirectory {
            path: root.to_path_buf(),
        }
        .into());
    }

    Ok(dunce::canonicalize(root)?)
}

/// Configuration for a walk of `root`, from `explicit` when given
pub fn load_config(explicit: Option<&Path>, root: &Path) -> Result<ScanConfig> {
    let config = match explicit {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::discover(root)?,
    };
    Ok(config)
}
