//! Pre-order tree walk with rule-file discovery and subtree pruning

use crate::config::ScanConfig;
use crate::core::error::{Result, TreeIgnoreError};
use crate::ignore::analytics::{ScanAnalytics, ScanObserver, ScanReport};
use crate::ignore::checker::{parent_key, RuleRegistry};
use crate::ignore::parser::Pattern;
use crate::ignore::rules::RuleSet;
use crate::ignore::tree::{EntryKind, TreeEntry, TreeSource};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Default rule file name
pub const DEFAULT_RULE_FILE: &str = ".gitignore";

/// What happened to a directory node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    /// Included and descended into
    Enter,
    /// Excluded; nothing beneath it was visited
    SkipSubtree,
    /// Included, but its listing could not be read
    FailEntry,
}

/// Why a checked path is excluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    /// Key of the excluded node: the path itself or a pruned ancestor
    pub key: String,
    /// Key of the directory owning the matching rule set
    pub anchor: String,
    /// Raw text of the matching pattern
    pub pattern: String,
}

/// Decision for a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub key: String,
    pub kind: EntryKind,
    pub excluded_by: Option<Exclusion>,
}

impl Verdict {
    pub fn is_excluded(&self) -> bool {
        self.excluded_by.is_some()
    }
}

/// Walks one tree, deciding every node against the nearest rule set.
///
/// The walker owns the rule registry of its traversal; both are consumed by
/// [`walk`](Self::walk) or [`check`](Self::check).
pub struct TreeWalker<'a, S: TreeSource + ?Sized> {
    source: &'a S,
    registry: RuleRegistry,
    analytics: ScanAnalytics,
    observer: Option<Box<dyn ScanObserver + 'a>>,
    processor: Option<Box<dyn FnMut(&Path) + 'a>>,
}

impl<'a, S: TreeSource + ?Sized> TreeWalker<'a, S> {
    /// Create a walker for `root` using `.gitignore` files and no custom rules
    pub fn new(source: &'a S, root: impl Into<PathBuf>) -> Self {
        Self {
            source,
            registry: RuleRegistry::new(root, DEFAULT_RULE_FILE, Vec::new()),
            analytics: ScanAnalytics::new(),
            observer: None,
            processor: None,
        }
    }

    /// Create a walker for `root` configured by `config`
    pub fn from_config(source: &'a S, root: impl Into<PathBuf>, config: &ScanConfig) -> Self {
        Self::new(source, root)
            .rule_file(config.rule_file.clone())
            .custom_rules(config.custom_rules.clone())
    }

    /// Set the rule file name looked up in every directory
    pub fn rule_file(mut self, name: impl Into<String>) -> Self {
        let custom_rules = self.registry.custom_rules().to_vec();
        self.registry = RuleRegistry::new(self.registry.root().to_path_buf(), name, custom_rules);
        self
    }

    /// Set rules appended to every rule set
    pub fn custom_rules(mut self, rules: Vec<String>) -> Self {
        let name = self.registry.rule_file().to_string();
        self.registry = RuleRegistry::new(self.registry.root().to_path_buf(), name, rules);
        self
    }

    /// Set the function called once for every included file
    pub fn with_processor<F>(mut self, processor: F) -> Self
    where
        F: FnMut(&Path) + 'a,
    {
        self.processor = Some(Box::new(processor));
        self
    }

    /// Set an observer receiving every event of the walk
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: ScanObserver + 'a,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Walk the whole tree and return the final counts
    pub fn walk(mut self) -> ScanReport {
        let root = self.registry.root().to_path_buf();
        info!(root = %root.display(), "Starting file processing");

        self.visit_directory(&root);

        let report = self.analytics.report();
        info!(
            files_seen = report.files_seen,
            files_included = report.files_included,
            files_excluded = report.files_excluded,
            dirs_included = report.dirs_included,
            dirs_excluded = report.dirs_excluded,
            "Finished file processing"
        );
        report
    }

    /// Visit a directory: register its rule file, decide it, and descend
    /// into it unless it is excluded
    pub fn visit_directory(&mut self, dir: &Path) -> VisitOutcome {
        let key = self.registry.path(dir);
        self.load_rules(dir, &key);

        if let Some((_, pattern)) = self.decide(&key, &key, &node_name(dir, &key)) {
            self.emit(|o| o.on_dir_excluded(&key, &pattern));
            return VisitOutcome::SkipSubtree;
        }
        self.emit(|o| o.on_dir_included(&key));

        let entries = match self.source.read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.emit(|o| o.on_entry_failed(&e));
                return VisitOutcome::FailEntry;
            },
        };

        for entry in entries {
            match entry {
                Ok(TreeEntry {
                    path,
                    kind: EntryKind::Directory,
                }) => {
                    self.visit_directory(&path);
                },
                Ok(TreeEntry {
                    path,
                    kind: EntryKind::File,
                }) => self.visit_file(&path),
                Err(e) => self.emit(|o| o.on_entry_failed(&e)),
            }
        }

        VisitOutcome::Enter
    }

    /// Visit a file: decide it and hand it to the processor when included
    pub fn visit_file(&mut self, file: &Path) {
        let key = self.registry.path(file);
        self.emit(|o| o.on_file_seen(&key));

        let lookup = parent_key(&key).unwrap_or(&key);
        match self.decide(lookup, &key, &node_name(file, &key)) {
            Some((_, pattern)) => self.emit(|o| o.on_file_excluded(&key, &pattern)),
            None => {
                self.emit(|o| o.on_file_included(&key));
                if let Some(processor) = self.processor.as_mut() {
                    processor(file);
                }
            },
        }
    }

    /// Decide a single path the way a full walk would reach it: every
    /// directory from the root down is entered in turn, and the first
    /// excluded one prunes the path.
    pub fn check(mut self, target: &Path) -> Result<Verdict> {
        let root = self.registry.root().to_path_buf();
        let relative = target.strip_prefix(&root).map_err(|_| {
            let e = io::Error::new(io::ErrorKind::NotFound, "path is outside the walk root");
            TreeIgnoreError::entry_visit(target, e)
        })?;
        let kind = self.source.entry_kind(target)?.ok_or_else(|| {
            let e = io::Error::new(io::ErrorKind::NotFound, "no such file or directory");
            TreeIgnoreError::entry_visit(target, e)
        })?;

        let mut dirs = vec![root.clone()];
        let mut current = root;
        for component in relative.components() {
            current = current.join(component);
            dirs.push(current.clone());
        }
        if kind == EntryKind::File {
            dirs.pop();
        }

        let key = self.registry.path(target);
        for dir in &dirs {
            let dir_key = self.registry.path(dir);
            self.load_rules(dir, &dir_key);

            if let Some((rules, pattern)) = self.decide(&dir_key, &dir_key, &node_name(dir, &dir_key)) {
                return Ok(Verdict {
                    key,
                    kind,
                    excluded_by: Some(Exclusion {
                        key: dir_key,
                        anchor: rules.anchor().to_string(),
                        pattern: pattern.raw().to_string(),
                    }),
                });
            }
        }

        let mut excluded_by = None;
        if kind == EntryKind::File {
            let lookup = parent_key(&key).unwrap_or(&key);
            if let Some((rules, pattern)) = self.decide(lookup, &key, &node_name(target, &key)) {
                excluded_by = Some(Exclusion {
                    key: key.clone(),
                    anchor: rules.anchor().to_string(),
                    pattern: pattern.raw().to_string(),
                });
            }
        }

        Ok(Verdict {
            key,
            kind,
            excluded_by,
        })
    }

    /// Register the rule file of `dir`. Custom rules still apply at the root
    /// when it has no rule file of its own.
    fn load_rules(&mut self, dir: &Path, key: &str) {
        let source = self.source;
        let loaded = self.registry.parse_gitignore(source, dir).is_some();

        if !loaded && dir == self.registry.root() && !self.registry.custom_rules().is_empty() {
            self.registry.insert_custom_rules(key);
        }
    }

    /// Pattern of the nearest rule set at or above `lookup` that excludes
    /// the node `key` named `name`
    fn decide(&self, lookup: &str, key: &str, name: &str) -> Option<(Arc<RuleSet>, Arc<Pattern>)> {
        let rules = self.registry.get_rules_for_directory(lookup)?;
        let pattern = rules.excluding_pattern(rules.match_key(key, name))?;
        Some((Arc::clone(rules), Arc::clone(pattern)))
    }

    fn emit<F>(&mut self, event: F)
    where
        F: Fn(&mut dyn ScanObserver),
    {
        event(&mut self.analytics);
        if let Some(observer) = self.observer.as_deref_mut() {
            event(observer);
        }
    }
}

fn node_name(path: &Path, key: &str) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| key.to_string())
}
