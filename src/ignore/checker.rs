//! Rule registry with nearest-ancestor resolution
//!
//! Every rule file found during a walk becomes a [`RuleSet`] registered under
//! its directory's key. A lookup walks a key's parent chain and stops at the
//! first registered set: the nearest rule file wins outright and is never
//! merged with the rule files above it.

use crate::ignore::rules::RuleSet;
use crate::ignore::tree::TreeSource;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Rule sets of one walk, keyed by directory
#[derive(Debug)]
pub struct RuleRegistry {
    /// Walk root
    root: PathBuf,
    /// Key of the walk root: its own name
    root_key: String,
    /// Name of the rule file looked up in every directory
    rule_file: String,
    /// Rules appended to every rule set
    custom_rules: Vec<String>,
    sets: HashMap<String, Arc<RuleSet>>,
}

impl RuleRegistry {
    /// Create an empty registry for a walk of `root`
    pub fn new(root: impl Into<PathBuf>, rule_file: impl Into<String>, custom_rules: Vec<String>) -> Self {
        let root = root.into();
        let root_key = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| ".".to_string());

        Self {
            root,
            root_key,
            rule_file: rule_file.into(),
            custom_rules,
            sets: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn root_key(&self) -> &str {
        &self.root_key
    }

    pub fn rule_file(&self) -> &str {
        &self.rule_file
    }

    pub fn custom_rules(&self) -> &[String] {
        &self.custom_rules
    }

    /// Key of `path`: its path relative to the parent of the walk root,
    /// segments joined with `/` on every platform
    pub fn path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(relative) => {
                let mut key = self.root_key.clone();
                for component in relative.components() {
                    key.push('/');
                    key.push_str(&component.as_os_str().to_string_lossy());
                }
                key
            },
            Err(_) => path
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
        }
    }

    /// Load the rule file directly inside `directory`, if there is one, and
    /// register it. A missing file is not an error; an unreadable one is
    /// logged and the directory simply gets no rule set of its own.
    pub fn parse_gitignore<S>(&mut self, source: &S, directory: &Path) -> Option<Arc<RuleSet>>
    where
        S: TreeSource + ?Sized,
    {
        let rule_path = directory.join(&self.rule_file);

        match source.read_rule_file(&rule_path) {
            Ok(Some(content)) => {
                info!(path = %rule_path.display(), "Rule file detected");
                let key = self.path(directory);
                let rules = RuleSet::from_content(key, &content, &self.custom_rules);
                Some(self.insert(rules))
            },
            Ok(None) => None,
            Err(e) => {
                warn!("{}; continuing without local rules", e);
                None
            },
        }
    }

    /// Register a rule set holding only the custom rules under `key`
    pub fn insert_custom_rules(&mut self, key: impl Into<String>) -> Arc<RuleSet> {
        let rules = RuleSet::new(key, std::iter::empty::<&str>(), &self.custom_rules);
        self.insert(rules)
    }

    /// Register `rules` under its anchor. A later set replaces an earlier
    /// one with the same anchor.
    pub fn insert(&mut self, rules: RuleSet) -> Arc<RuleSet> {
        let rules = Arc::new(rules);
        if self
            .sets
            .insert(rules.anchor().to_string(), Arc::clone(&rules))
            .is_some()
        {
            debug!(anchor = rules.anchor(), "Replaced rule set");
        }
        rules
    }

    /// Nearest rule set at or above `key`
    pub fn get_rules_for_directory(&self, key: &str) -> Option<&Arc<RuleSet>> {
        let mut current = Some(key);
        while let Some(key) = current {
            if let Some(rules) = self.sets.get(key) {
                return Some(rules);
            }
            current = parent_key(key);
        }
        None
    }

    /// Number of registered rule sets and of patterns across them
    pub fn stats(&self) -> (usize, usize) {
        let patterns = self.sets.values().map(|rules| rules.patterns().len()).sum();
        (self.sets.len(), patterns)
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Parent of a `/` separated key, `None` for a single segment
pub fn parent_key(key: &str) -> Option<&str> {
    key.rfind('/').map(|index| &key[..index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ignore::tree::{FsTree, MemoryTree};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_path_is_relative_to_root_parent() {
        let registry = RuleRegistry::new("/work/proj", ".gitignore", Vec::new());
        assert_eq!(registry.root_key(), "proj");
        assert_eq!(registry.path(Path::new("/work/proj")), "proj");
        assert_eq!(registry.path(Path::new("/work/proj/src/lib.rs")), "proj/src/lib.rs");
    }

    #[test]
    fn test_parent_key() {
        assert_eq!(parent_key("proj/a/b"), Some("proj/a"));
        assert_eq!(parent_key("proj/a"), Some("proj"));
        assert_eq!(parent_key("proj"), None);
    }

    #[test]
    fn test_parse_gitignore() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "*.log\n*.tmp\n")?;

        let mut registry = RuleRegistry::new(root, ".gitignore", Vec::new());
        let parsed = registry.parse_gitignore(&FsTree::new(), root);
        assert!(parsed.is_some());

        let key = registry.path(root);
        let rules = registry.get_rules_for_directory(&key).unwrap();
        assert_eq!(rules.raw_rules(), &["*.log".to_string(), "*.tmp".to_string()]);
        assert_eq!(rules.anchor(), key);
        Ok(())
    }

    #[test]
    fn test_missing_rule_file_registers_nothing() {
        let tree = MemoryTree::new("/proj").file("/proj/a.txt", "");
        let mut registry = RuleRegistry::new("/proj", ".gitignore", Vec::new());

        assert!(registry.parse_gitignore(&tree, Path::new("/proj")).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unreadable_rule_file_is_not_fatal() {
        let tree = MemoryTree::new("/proj")
            .file("/proj/.gitignore", "*.log")
            .fail("/proj/.gitignore");
        let mut registry = RuleRegistry::new("/proj", ".gitignore", Vec::new());

        assert!(registry.parse_gitignore(&tree, Path::new("/proj")).is_none());
        assert!(registry.get_rules_for_directory("proj").is_none());
    }

    #[test]
    fn test_nearest_rule_set_wins() {
        let tree = MemoryTree::new("/proj")
            .file("/proj/.gitignore", "*.tmp")
            .file("/proj/sub/.gitignore", "*.md");
        let mut registry = RuleRegistry::new("/proj", ".gitignore", Vec::new());
        registry.parse_gitignore(&tree, Path::new("/proj"));
        registry.parse_gitignore(&tree, Path::new("/proj/sub"));

        assert_eq!(registry.get_rules_for_directory("proj").unwrap().anchor(), "proj");
        assert_eq!(registry.get_rules_for_directory("proj/other/deep").unwrap().anchor(), "proj");
        let sub = registry.get_rules_for_directory("proj/sub/deeper").unwrap();
        assert_eq!(sub.anchor(), "proj/sub");
        assert!(sub.excluding_pattern("keep.tmp").is_none());
        assert_eq!(registry.stats(), (2, 2));
    }

    #[test]
    fn test_custom_rules_ride_along() {
        let tree = MemoryTree::new("/proj").file("/proj/.gitignore", "*.tmp");
        let custom = vec![r".*\.jar".to_string()];
        let mut registry = RuleRegistry::new("/proj", ".gitignore", custom);

        let rules = registry.parse_gitignore(&tree, Path::new("/proj")).unwrap();
        assert_eq!(rules.patterns().len(), 2);

        let only_custom = registry.insert_custom_rules("proj/lib");
        assert_eq!(only_custom.patterns().len(), 1);
        assert!(only_custom.raw_rules().is_empty());
    }

    #[test]
    fn test_reparse_replaces() {
        let mut registry = RuleRegistry::new("/proj", ".gitignore", Vec::new());
        registry.insert(RuleSet::new("proj", ["*.a"], &[]));
        registry.insert(RuleSet::new("proj", ["*.b"], &[]));

        let rules = registry.get_rules_for_directory("proj").unwrap();
        assert_eq!(rules.raw_rules(), &["*.b".to_string()]);
    }
}
