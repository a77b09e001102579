//! Rule line filtering and pattern compilation
//!
//! A rule file line is first filtered ([`parse_line`]), then classified
//! ([`classify`]) and compiled into a [`Pattern`]. Classification follows a
//! fixed precedence: simple file name, rooted, directory suffix, general glob.

use crate::ignore::glob::Glob;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Where a pattern came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternOrigin {
    /// A line of a rule file, in glob syntax
    FileRule,
    /// A caller-supplied rule, in regular expression syntax
    CustomRule,
}

/// Classification of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// No `/`, no `*`, no leading `.`: matches a final path segment exactly
    SimpleName,
    /// Leading `/`: anchored to the rule set's directory
    Rooted,
    /// Trailing `/`: the named directory and everything beneath it
    DirectorySuffix,
    /// Anything else
    Glob,
    /// Custom rule, compiled as a regular expression
    Custom,
}

#[derive(Debug)]
enum Matcher {
    Regex(Regex),
    /// Fallback when the lowered expression cannot be built
    Literal(String),
}

/// A compiled exclusion rule
#[derive(Debug)]
pub struct Pattern {
    raw: String,
    kind: PatternKind,
    origin: PatternOrigin,
    matcher: Matcher,
}

impl Pattern {
    /// Compile one already filtered rule. Never fails: text that cannot be
    /// turned into a matcher degrades to an exact comparison with `raw`.
    pub fn compile(raw: &str, origin: PatternOrigin) -> Self {
        let (kind, source) = match origin {
            PatternOrigin::FileRule => {
                let kind = classify(raw);
                (kind, lower_file_rule(raw, kind))
            },
            PatternOrigin::CustomRule => (PatternKind::Custom, raw.to_string()),
        };

        let matcher = match Regex::new(&format!("(?s)^(?:{})$", source)) {
            Ok(regex) => {
                debug!(pattern = raw, regex = regex.as_str(), "Processed pattern");
                Matcher::Regex(regex)
            },
            Err(e) => {
                warn!(pattern = raw, error = %e, "Pattern degraded to a literal match");
                Matcher::Literal(raw.to_string())
            },
        };

        Self {
            raw: raw.to_string(),
            kind,
            origin,
            matcher,
        }
    }

    /// Whether `path` (relative to the rule set's anchor, `/` separated)
    /// matches this pattern in full
    pub fn matches(&self, path: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(regex) => regex.is_match(path),
            Matcher::Literal(text) => path == text,
        }
    }

    /// The rule text as written
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn origin(&self) -> PatternOrigin {
        self.origin
    }

    /// The expression actually matched against, for diagnostics
    pub fn matcher_source(&self) -> &str {
        match &self.matcher {
            Matcher::Regex(regex) => regex.as_str(),
            Matcher::Literal(text) => text,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Filter one rule file line. Returns the trimmed rule, or `None` for blank
/// lines, comments and negations. Negated rules are dropped: they never
/// re-include anything.
pub fn parse_line(line: &str) -> Option<&str> {
    let line = line.trim();

    if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
        return None;
    }

    Some(line)
}

/// Classify a filtered rule
pub fn classify(raw: &str) -> PatternKind {
    if !raw.contains('/') && !raw.contains('*') && !raw.starts_with('.') {
        PatternKind::SimpleName
    } else if raw.starts_with('/') {
        PatternKind::Rooted
    } else if raw.ends_with('/') {
        PatternKind::DirectorySuffix
    } else {
        PatternKind::Glob
    }
}

/// Unanchored regular expression for a file rule of the given kind
fn lower_file_rule(raw: &str, kind: PatternKind) -> String {
    const ANY_PARENT: &str = "(?:.*/)?";
    const ANY_CHILD: &str = "(?:/.*)?";

    match kind {
        PatternKind::SimpleName => format!("{}{}", ANY_PARENT, regex::escape(raw)),
        PatternKind::Rooted => {
            let body = &raw[1..];
            match body.strip_suffix('/') {
                Some(dir) => format!("/?{}{}", Glob::parse(dir).to_regex(), ANY_CHILD),
                None => format!("/?{}", Glob::parse(body).to_regex()),
            }
        },
        PatternKind::DirectorySuffix => {
            let dir = &raw[..raw.len() - 1];
            format!("{}{}{}", ANY_PARENT, Glob::parse(dir).to_regex(), ANY_CHILD)
        },
        PatternKind::Glob | PatternKind::Custom => {
            let glob = Glob::parse(raw).to_regex();
            if raw.contains('/') {
                glob
            } else {
                format!("{}{}", ANY_PARENT, glob)
            }
        },
    }
}
