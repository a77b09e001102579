//! treeignore - hierarchical ignore-file evaluation for directory trees
//!
//! treeignore walks a directory tree and decides, for every file and
//! directory, whether the ignore files found along the way exclude it.
//! Excluded directories are pruned: nothing beneath them is visited.
//!
//! # Core Features
//!
//! - **Glob Compilation**: gitignore-style rules parsed into a small syntax
//!   tree and compiled once per rule set
//! - **Nearest Rule Set Wins**: each node is decided by the closest directory
//!   owning a rule file, with no merging of ancestor rules
//! - **Pruning**: excluded directories are never descended into
//! - **Pluggable Trees**: the same walk runs on the filesystem or on an
//!   in-memory tree
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use treeignore::{FsTree, TreeWalker};
//!
//! let tree = FsTree::new();
//! let report = TreeWalker::new(&tree, "./my-project")
//!     .custom_rules(vec![r".*\.jar".to_string()])
//!     .with_processor(|path| println!("{}", path.display()))
//!     .walk();
//!
//! println!("{} of {} files included", report.files_included, report.files_seen);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod ignore;

// Re-export commonly used types
pub use crate::core::error::{Result, TreeIgnoreError};

pub use config::ScanConfig;

pub use ignore::{
    analytics::{ScanObserver, ScanReport},
    checker::RuleRegistry,
    parser::{Pattern, PatternKind, PatternOrigin},
    rules::RuleSet,
    scanner::{TreeWalker, Verdict, VisitOutcome},
    tree::{EntryKind, FsTree, MemoryTree, TreeSource},
};

/// Current version of treeignore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
