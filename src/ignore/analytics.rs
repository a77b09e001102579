//! Walk events, counters and the final report

use crate::core::error::TreeIgnoreError;
use crate::ignore::parser::Pattern;
use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, warn};

/// Receives every decision of a walk, in traversal order.
///
/// Keys are `/` separated paths relative to the parent of the walk root.
pub trait ScanObserver {
    fn on_file_seen(&mut self, _key: &str) {}

    fn on_file_included(&mut self, _key: &str) {}

    fn on_file_excluded(&mut self, _key: &str, _pattern: &Pattern) {}

    fn on_dir_included(&mut self, _key: &str) {}

    fn on_dir_excluded(&mut self, _key: &str, _pattern: &Pattern) {}

    fn on_entry_failed(&mut self, _error: &TreeIgnoreError) {}
}

/// Counters of one walk
#[derive(Debug, Default)]
pub struct ScanAnalytics {
    files_seen: usize,
    files_included: usize,
    files_excluded: usize,
    dirs_included: usize,
    dirs_excluded: usize,
    entries_failed: usize,
    /// Raw text of every pattern that excluded something, first use first
    used_patterns: IndexSet<String>,
}

impl ScanAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the counters
    pub fn report(&self) -> ScanReport {
        ScanReport {
            files_seen: self.files_seen,
            files_included: self.files_included,
            files_excluded: self.files_excluded,
            dirs_included: self.dirs_included,
            dirs_excluded: self.dirs_excluded,
            entries_failed: self.entries_failed,
            used_patterns: self.used_patterns.iter().cloned().collect(),
        }
    }

    fn on_pattern_used(&mut self, pattern: &Pattern) {
        if !self.used_patterns.contains(pattern.raw()) {
            self.used_patterns.insert(pattern.raw().to_string());
        }
    }
}

impl ScanObserver for ScanAnalytics {
    fn on_file_seen(&mut self, _key: &str) {
        self.files_seen += 1;
    }

    fn on_file_included(&mut self, key: &str) {
        self.files_included += 1;
        debug!(path = key, "Included file");
    }

    fn on_file_excluded(&mut self, key: &str, pattern: &Pattern) {
        self.files_excluded += 1;
        self.on_pattern_used(pattern);
        debug!(path = key, pattern = %pattern, "Excluded file");
    }

    fn on_dir_included(&mut self, key: &str) {
        self.dirs_included += 1;
        debug!(path = key, "Included directory");
    }

    fn on_dir_excluded(&mut self, key: &str, pattern: &Pattern) {
        self.dirs_excluded += 1;
        self.on_pattern_used(pattern);
        debug!(path = key, pattern = %pattern, "Excluded directory");
    }

    fn on_entry_failed(&mut self, error: &TreeIgnoreError) {
        self.entries_failed += 1;
        warn!("{}", error);
    }
}

/// Final counts of a walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub files_seen: usize,
    pub files_included: usize,
    pub files_excluded: usize,
    pub dirs_included: usize,
    pub dirs_excluded: usize,
    /// Entries skipped because they could not be read
    pub entries_failed: usize,
    /// Patterns that excluded at least one entry
    pub used_patterns: Vec<String>,
}
