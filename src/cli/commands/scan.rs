//! Scan command implementation

use crate::cli::commands::{load_config, resolve_root};
use crate::cli::output::{print_summary, DecisionPrinter};
use crate::cli::RuleArgs;
use crate::ignore::scanner::TreeWalker;
use crate::ignore::tree::FsTree;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute the scan command
pub fn execute(
    root: PathBuf,
    rules: RuleArgs,
    list: bool,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let root = resolve_root(&root)?;
    let config = rules.apply(load_config(config_path, &root)?);

    let tree = FsTree::new().follow_links(config.follow_links);
    let mut walker = TreeWalker::from_config(&tree, &root, &config);
    if list && !json {
        walker = walker.with_observer(DecisionPrinter);
    }

    let start = Instant::now();
    let report = walker.walk();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if list {
            println!();
        }
        print_summary(&report, start.elapsed());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_directory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "*.log\n")?;
        fs::write(root.join("a.log"), "x")?;
        fs::write(root.join("b.txt"), "x")?;

        execute(root.to_path_buf(), RuleArgs::default(), true, false, None)?;
        execute(root.to_path_buf(), RuleArgs::default(), false, true, None)?;
        Ok(())
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = execute(
            temp_dir.path().join("missing"),
            RuleArgs::default(),
            false,
            false,
            None,
        );
        assert!(result.is_err());
    }
}
