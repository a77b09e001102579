//! treeignore CLI
//!
//! Command-line interface for the treeignore rule engine.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use treeignore::cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over the verbosity flags
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    // Execute the command
    match cli.command {
        Commands::Scan {
            root,
            rules,
            list,
            json,
        } => commands::scan::execute(root, rules, list, json, config),
        Commands::Check {
            path,
            root,
            rules,
            json,
        } => commands::check::execute(path, root, rules, json, config),
        Commands::Completion { shell } => commands::completion::execute(shell),
    }
}
