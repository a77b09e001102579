//! File ignore system with hierarchical rule files
//!
//! Rule files (`.gitignore` by default) may sit in any directory of a tree.
//! Each one is compiled into a [`RuleSet`] anchored at its directory; every
//! node of the tree is decided against the nearest rule set at or above it,
//! and excluded directories are pruned without being descended into.
//!
//! Negated rules (`!pattern`) are dropped and never re-include anything, and
//! a directory's own rule set fully replaces the ones above it.

pub mod analytics;
pub mod checker;
pub mod glob;
pub mod parser;
pub mod rules;
pub mod scanner;
pub mod tree;

// Re-export commonly used items
pub use analytics::{ScanAnalytics, ScanObserver, ScanReport};
pub use checker::RuleRegistry;
pub use parser::{Pattern, PatternKind, PatternOrigin};
pub use rules::RuleSet;
pub use scanner::{Exclusion, TreeWalker, Verdict, VisitOutcome, DEFAULT_RULE_FILE};
pub use tree::{EntryKind, FsTree, MemoryTree, TreeEntry, TreeSource};
