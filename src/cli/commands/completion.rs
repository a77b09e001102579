//! Completion command implementation

use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

const BIN_NAME: &str = "treeignore";

/// Generate a shell completion script on stdout; instructions go to stderr
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());

    eprintln!("\n{}", "Installation Instructions:".bold());
    match shell {
        Shell::Bash => {
            eprintln!("  Add the following to your ~/.bashrc or ~/.bash_profile:");
            eprintln!("  {}", "eval \"$(treeignore completion bash 2>/dev/null)\"".cyan());
        },
        Shell::Zsh => {
            eprintln!("  Save to a file in your fpath:");
            eprintln!(
                "  {}",
                "treeignore completion zsh > ~/.local/share/zsh/site-functions/_treeignore".cyan()
            );
        },
        Shell::Fish => {
            eprintln!("  Save the completion script:");
            eprintln!(
                "  {}",
                "treeignore completion fish > ~/.config/fish/completions/treeignore.fish".cyan()
            );
        },
        Shell::PowerShell => {
            eprintln!("  Add the following to your PowerShell profile:");
            eprintln!(
                "  {}",
                "Invoke-Expression (& treeignore completion powershell)".cyan()
            );
        },
        _ => {
            eprintln!(
                "  Please refer to your shell's documentation for installing completion scripts."
            );
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_generation() {
        let shells = [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

        for shell in shells {
            let mut cmd = Cli::command();
            let mut output = Vec::new();
            generate(shell, &mut cmd, BIN_NAME, &mut output);

            assert!(
                !output.is_empty(),
                "No completion script generated for {:?}",
                shell
            );
        }
    }
}
