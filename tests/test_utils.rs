//! Test utilities for treeignore tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use treeignore::FsTree;

/// A directory tree on disk with automatic cleanup
///
/// The walk root is `<tempdir>/proj`, so keys start with `proj/` no matter
/// what the temporary directory is called.
pub struct TestTree {
    pub temp_dir: TempDir,
    root: PathBuf,
}

impl TestTree {
    /// Create an empty tree
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("proj");
        fs::create_dir_all(&root)?;
        Ok(Self { temp_dir, root })
    }

    /// Get the walk root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a file below the root, creating its parents
    pub fn write(&self, relative: &str, content: &str) -> anyhow::Result<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Create an empty directory below the root
    pub fn mkdir(&self, relative: &str) -> anyhow::Result<PathBuf> {
        let path = self.root.join(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Filesystem source for this tree
    pub fn source(&self) -> FsTree {
        FsTree::new()
    }
}

/// `/`-separated keys of `paths` relative to `base`
pub fn included_keys(base: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| {
            let relative = path.strip_prefix(base).unwrap_or(path);
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}
