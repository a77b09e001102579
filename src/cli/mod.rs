//! Command-line interface for treeignore

use crate::config::ScanConfig;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// treeignore - decide which files of a tree your ignore files exclude
#[derive(Parser)]
#[command(
    name = "treeignore",
    version,
    about = "Walk a directory tree and apply nested ignore files",
    long_about = "treeignore walks a directory tree, loads the ignore file of every directory it enters and decides each file and directory against the nearest one. Excluded directories are never descended into."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: <root>/.treeignore.toml, then ~/.treeignore/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk a tree and summarize what is included and excluded
    Scan {
        /// Root directory to walk
        #[arg(default_value = ".")]
        root: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,

        /// Print every decision as it is made
        #[arg(long)]
        list: bool,

        /// Output the final report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Explain the decision for a single path
    Check {
        /// File or directory to check
        path: PathBuf,

        /// Root directory the walk would start from
        #[arg(long, default_value = ".")]
        root: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Rule options shared by the commands that walk a tree
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Rule file name looked up in every directory
    #[arg(long, value_name = "NAME")]
    pub rule_file: Option<String>,

    /// Regular expression excluding every path it matches (repeatable)
    #[arg(long = "custom-rule", value_name = "REGEX")]
    pub custom_rules: Vec<String>,

    /// Descend into symbolic links to directories
    #[arg(long, overrides_with = "no_follow_links")]
    pub follow_links: bool,

    /// Treat symbolic links as files, even when the configuration follows them
    #[arg(long, overrides_with = "follow_links")]
    pub no_follow_links: bool,
}

impl RuleArgs {
    /// Layer the command-line options over a loaded configuration
    pub fn apply(&self, mut config: ScanConfig) -> ScanConfig {
        if let Some(rule_file) = &self.rule_file {
            config.rule_file = rule_file.clone();
        }
        config.custom_rules.extend(self.custom_rules.iter().cloned());
        if self.follow_links {
            config.follow_links = true;
        } else if self.no_follow_links {
            config.follow_links = false;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rule_args_override_config() {
        let config = ScanConfig {
            rule_file: ".gitignore".to_string(),
            custom_rules: vec!["a".to_string()],
            follow_links: false,
        };
        let args = RuleArgs {
            rule_file: Some(".ignore".to_string()),
            custom_rules: vec!["b".to_string()],
            follow_links: true,
            no_follow_links: false,
        };

        let config = args.apply(config);
        assert_eq!(config.rule_file, ".ignore");
        assert_eq!(config.custom_rules, vec!["a".to_string(), "b".to_string()]);
        assert!(config.follow_links);
    }

    #[test]
    fn test_follow_links_flags() {
        let followed = ScanConfig {
            follow_links: true,
            ..ScanConfig::default()
        };

        let args = RuleArgs::default();
        assert!(args.apply(followed.clone()).follow_links);

        let args = RuleArgs {
            no_follow_links: true,
            ..RuleArgs::default()
        };
        assert!(!args.apply(followed.clone()).follow_links);

        // the last of the two flags wins
        let cli = Cli::parse_from(["treeignore", "scan", "--no-follow-links", "--follow-links"]);
        let Commands::Scan { rules, .. } = cli.command else {
            panic!("expected scan");
        };
        assert!(rules.apply(ScanConfig::default()).follow_links);

        let cli = Cli::parse_from(["treeignore", "scan", "--follow-links", "--no-follow-links"]);
        let Commands::Scan { rules, .. } = cli.command else {
            panic!("expected scan");
        };
        assert!(!rules.apply(followed).follow_links);
    }

    #[test]
    fn test_log_filter() {
        let cli = Cli::parse_from(["treeignore", "--verbose", "scan"]);
        assert_eq!(cli.log_filter(), "debug");
        let cli = Cli::parse_from(["treeignore", "scan", "-q"]);
        assert_eq!(cli.log_filter(), "error");
        let cli = Cli::parse_from(["treeignore", "scan"]);
        assert_eq!(cli.log_filter(), "info");
    }
}
