//! Tree sources: where directory listings and rule files come from
//!
//! The walker only talks to a [`TreeSource`], so the same traversal runs
//! against the real filesystem ([`FsTree`]) or a synthetic tree held in
//! memory ([`MemoryTree`]).

use crate::core::error::{Result, TreeIgnoreError};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Kind of a tree entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One child of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Read access to a directory tree
pub trait TreeSource {
    /// List the direct children of `dir`, sorted by file name.
    ///
    /// The outer error means the listing itself failed. An inner error is a
    /// single child that could not be inspected; its siblings are still
    /// returned.
    fn read_dir(&self, dir: &Path) -> Result<Vec<Result<TreeEntry>>>;

    /// Contents of the rule file at `path`; `Ok(None)` when there is none
    fn read_rule_file(&self, path: &Path) -> Result<Option<String>>;

    /// Kind of the entry at `path`; `Ok(None)` when it does not exist
    fn entry_kind(&self, path: &Path) -> Result<Option<EntryKind>>;
}

/// The real filesystem
#[derive(Debug, Clone, Default)]
pub struct FsTree {
    follow_links: bool,
}

impl FsTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether symbolic links to directories are descended into
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

impl TreeSource for FsTree {
    fn read_dir(&self, dir: &Path) -> Result<Vec<Result<TreeEntry>>> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    let kind = if entry.file_type().is_dir() {
                        EntryKind::Directory
                    } else {
                        EntryKind::File
                    };
                    entries.push(Ok(TreeEntry::new(entry.path(), kind)));
                },
                // depth 0 is `dir` itself: the listing could not be opened
                Err(e) if e.depth() == 0 => {
                    return Err(TreeIgnoreError::entry_visit(dir, io::Error::from(e)));
                },
                Err(e) => {
                    let path = e.path().unwrap_or(dir).to_path_buf();
                    entries.push(Err(TreeIgnoreError::entry_visit(path, io::Error::from(e))));
                },
            }
        }

        Ok(entries)
    }

    fn read_rule_file(&self, path: &Path) -> Result<Option<String>> {
        // invalid UTF-8 becomes U+FFFD so the remaining lines still load
        match fs::read(path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TreeIgnoreError::rule_file_read(path, e)),
        }
    }

    fn entry_kind(&self, path: &Path) -> Result<Option<EntryKind>> {
        let metadata = if self.follow_links {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        };

        match metadata {
            Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
            Ok(_) => Ok(Some(EntryKind::File)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TreeIgnoreError::entry_visit(path, e)),
        }
    }
}

#[derive(Debug, Clone)]
enum MemoryNode {
    Directory,
    File(String),
}

/// A synthetic tree held in memory
///
/// Parents are created implicitly. Paths registered with
/// [`fail`](Self::fail) behave like entries the process may not read: a
/// failing directory cannot be listed, a failing file shows up as a failed
/// child of its parent, and a failing rule file cannot be read.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    nodes: BTreeMap<PathBuf, MemoryNode>,
    failures: BTreeSet<PathBuf>,
}

impl MemoryTree {
    /// Create a tree containing the directory `root`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::default().dir(root)
    }

    pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MemoryNode::Directory);
        self
    }

    pub fn file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.insert(path.as_ref(), MemoryNode::File(content.into()));
        self
    }

    pub fn fail(mut self, path: impl AsRef<Path>) -> Self {
        self.failures.insert(path.as_ref().to_path_buf());
        self
    }

    fn insert(&mut self, path: &Path, node: MemoryNode) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(MemoryNode::Directory);
        }
        self.nodes.insert(path.to_path_buf(), node);
    }

    fn denied(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("permission denied: {}", path.display()),
        )
    }
}

impl TreeSource for MemoryTree {
    fn read_dir(&self, dir: &Path) -> Result<Vec<Result<TreeEntry>>> {
        if self.failures.contains(dir) {
            return Err(TreeIgnoreError::entry_visit(dir, Self::denied(dir)));
        }
        match self.nodes.get(dir) {
            Some(MemoryNode::Directory) => {},
            Some(MemoryNode::File(_)) => {
                let e = io::Error::new(io::ErrorKind::Other, "not a directory");
                return Err(TreeIgnoreError::entry_visit(dir, e));
            },
            None => {
                let e = io::Error::new(io::ErrorKind::NotFound, "no such directory");
                return Err(TreeIgnoreError::entry_visit(dir, e));
            },
        }

        let entries = self
            .nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .map(|(path, node)| match node {
                MemoryNode::File(_) if self.failures.contains(path) => {
                    Err(TreeIgnoreError::entry_visit(path.clone(), Self::denied(path)))
                },
                MemoryNode::File(_) => Ok(TreeEntry::new(path.clone(), EntryKind::File)),
                MemoryNode::Directory => Ok(TreeEntry::new(path.clone(), EntryKind::Directory)),
            })
            .collect();

        Ok(entries)
    }

    fn read_rule_file(&self, path: &Path) -> Result<Option<String>> {
        if self.failures.contains(path) {
            return Err(TreeIgnoreError::rule_file_read(path, Self::denied(path)));
        }
        match self.nodes.get(path) {
            Some(MemoryNode::File(content)) => Ok(Some(content.clone())),
            Some(MemoryNode::Directory) => {
                let e = io::Error::new(io::ErrorKind::Other, "is a directory");
                Err(TreeIgnoreError::rule_file_read(path, e))
            },
            None => Ok(None),
        }
    }

    fn entry_kind(&self, path: &Path) -> Result<Option<EntryKind>> {
        Ok(self.nodes.get(path).map(|node| match node {
            MemoryNode::Directory => EntryKind::Directory,
            MemoryNode::File(_) => EntryKind::File,
        }))
    }
}
