//! Check command implementation

use crate::cli::commands::{load_config, resolve_root};
use crate::cli::output::print_verdict;
use crate::cli::RuleArgs;
use crate::ignore::scanner::TreeWalker;
use crate::ignore::tree::{EntryKind, FsTree};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Execute the check command
pub fn execute(
    path: PathBuf,
    root: PathBuf,
    rules: RuleArgs,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let root = resolve_root(&root)?;
    let config = rules.apply(load_config(config_path, &root)?);

    // canonical like the root, so the target strips cleanly off it
    let target = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()?.join(path)
    };
    let target = dunce::canonicalize(&target)?;

    let tree = FsTree::new().follow_links(config.follow_links);
    let verdict = TreeWalker::from_config(&tree, &root, &config).check(&target)?;

    if json {
        let output = serde_json::json!({
            "path": verdict.key,
            "kind": match verdict.kind {
                EntryKind::File => "file",
                EntryKind::Directory => "directory",
            },
            "excluded": verdict.is_excluded(),
            "pattern": verdict.excluded_by.as_ref().map(|e| e.pattern.as_str()),
            "anchor": verdict.excluded_by.as_ref().map(|e| e.anchor.as_str()),
            "pruned_at": verdict.excluded_by.as_ref().map(|e| e.key.as_str()),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_verdict(&verdict);
    }

    Ok(())
}
