//! Ordered, immutable rule sets owned by one directory

use crate::ignore::parser::{parse_line, Pattern, PatternOrigin};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// The compiled rules of one rule file, plus the custom rules appended
/// after them.
///
/// Pattern order is fixed at construction and is the match precedence:
/// [`excluding_pattern`](Self::excluding_pattern) returns the first pattern
/// that matches. Identical rule text is compiled once per set and shared.
#[derive(Debug)]
pub struct RuleSet {
    /// Key of the directory owning the rule file
    anchor: String,
    /// Rule file lines that survived filtering, in file order
    raw_rules: Vec<String>,
    patterns: Vec<Arc<Pattern>>,
    cache: HashMap<(PatternOrigin, String), Arc<Pattern>>,
}

impl RuleSet {
    /// Build a rule set from rule file lines and custom rules
    pub fn new<I, S>(anchor: impl Into<String>, lines: I, custom_rules: &[String]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self {
            anchor: anchor.into(),
            raw_rules: Vec::new(),
            patterns: Vec::new(),
            cache: HashMap::new(),
        };

        for line in lines {
            if let Some(rule) = parse_line(line.as_ref()) {
                set.raw_rules.push(rule.to_string());
                let pattern = set.get_or_compile(rule, PatternOrigin::FileRule);
                set.patterns.push(pattern);
            }
        }

        for rule in custom_rules.iter().filter(|rule| !rule.is_empty()) {
            let pattern = set.get_or_compile(rule, PatternOrigin::CustomRule);
            set.patterns.push(pattern);
        }

        debug!(
            anchor = %set.anchor,
            patterns = set.patterns.len(),
            compiled = set.cache.len(),
            "Built rule set"
        );
        set
    }

    /// Build a rule set from the full text of a rule file
    pub fn from_content(anchor: impl Into<String>, content: &str, custom_rules: &[String]) -> Self {
        Self::new(anchor, content.lines(), custom_rules)
    }

    fn get_or_compile(&mut self, raw: &str, origin: PatternOrigin) -> Arc<Pattern> {
        self.cache
            .entry((origin, raw.to_string()))
            .or_insert_with(|| Arc::new(Pattern::compile(raw, origin)))
            .clone()
    }

    /// First pattern, in construction order, that matches `path`
    pub fn excluding_pattern(&self, path: &str) -> Option<&Arc<Pattern>> {
        self.patterns.iter().find(|pattern| pattern.matches(path))
    }

    /// The compiled pattern for `raw`, if this set contains it
    pub fn cached(&self, raw: &str, origin: PatternOrigin) -> Option<&Arc<Pattern>> {
        self.cache.get(&(origin, raw.to_string()))
    }

    /// Number of distinct compiled patterns
    pub fn compiled_count(&self) -> usize {
        self.cache.len()
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn patterns(&self) -> &[Arc<Pattern>] {
        &self.patterns
    }

    pub fn raw_rules(&self) -> &[String] {
        &self.raw_rules
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The string a node is matched with: its key relative to this set's
    /// anchor, or its own name when the node is the anchor itself.
    pub fn match_key<'a>(&self, key: &'a str, name: &'a str) -> &'a str {
        let relative = if key == self.anchor {
            ""
        } else {
            key.strip_prefix(self.anchor.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(key)
        };

        if relative.is_empty() {
            name
        } else {
            relative
        }
    }
}
