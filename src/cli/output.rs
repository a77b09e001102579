//! Human-readable output

use crate::ignore::analytics::{ScanObserver, ScanReport};
use crate::ignore::parser::Pattern;
use crate::ignore::scanner::Verdict;
use crate::ignore::tree::EntryKind;
use colored::Colorize;
use std::time::Duration;

/// Print the summary of a finished walk
pub fn print_summary(report: &ScanReport, elapsed: Duration) {
    println!("{}", "Summary:".bold());
    println!("  • Files seen: {}", report.files_seen);
    println!("  • Files included: {}", report.files_included.to_string().green());
    println!("  • Files excluded: {}", report.files_excluded.to_string().red());
    println!("  • Directories included: {}", report.dirs_included.to_string().green());
    println!("  • Directories excluded: {}", report.dirs_excluded.to_string().red());
    if report.entries_failed > 0 {
        println!("  • Entries failed: {}", report.entries_failed.to_string().yellow());
    }

    if report.used_patterns.is_empty() {
        println!("  • Patterns used: none");
    } else {
        println!("  • Patterns used:");
        for pattern in &report.used_patterns {
            println!("      {}", pattern.cyan());
        }
    }

    println!(
        "\n{} ({})",
        "✓ Scan complete".green(),
        humantime::format_duration(truncate_to_millis(elapsed))
    );
}

/// Print the decision for one path
pub fn print_verdict(verdict: &Verdict) {
    let kind = match verdict.kind {
        EntryKind::File => "file",
        EntryKind::Directory => "directory",
    };

    match &verdict.excluded_by {
        Some(exclusion) => {
            println!("{} {} ({})", "Excluded:".red().bold(), verdict.key, kind);
            println!("  • Pattern: {}", exclusion.pattern.cyan());
            println!("  • Rule file of: {}", exclusion.anchor);
            if exclusion.key != verdict.key {
                println!("  • Pruned at: {}", exclusion.key);
            }
        },
        None => println!("{} {} ({})", "Included:".green().bold(), verdict.key, kind),
    }
}

fn truncate_to_millis(elapsed: Duration) -> Duration {
    Duration::from_millis(elapsed.as_millis() as u64)
}

/// Prints every decision of a walk as it happens
#[derive(Debug, Default)]
pub struct DecisionPrinter;

impl ScanObserver for DecisionPrinter {
    fn on_file_included(&mut self, key: &str) {
        println!("{} {}", "+".green(), key);
    }

    fn on_file_excluded(&mut self, key: &str, pattern: &Pattern) {
        println!("{} {} {}", "-".red(), key, format!("({})", pattern).dimmed());
    }

    fn on_dir_included(&mut self, key: &str) {
        println!("{} {}/", "+".green(), key);
    }

    fn on_dir_excluded(&mut self, key: &str, pattern: &Pattern) {
        println!("{} {}/ {}", "-".red(), key, format!("({})", pattern).dimmed());
    }
}
