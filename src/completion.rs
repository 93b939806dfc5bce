//! # Shell Completion Module
//!
//! Generation of completion scripts for the supported shells through
//! clap's completion system.
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! tunebook completion bash > ~/.local/share/bash-completion/completions/tunebook
//!
//! # Generate zsh completions
//! tunebook completion zsh > ~/.config/zsh/completions/_tunebook
//! ```

use crate::cli::Shell;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::{self, Write};

/// Generate shell completions for the given shell on stdout
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate_completions_to(gen, cmd, &mut io::stdout());
}

/// Generate shell completions into any writer
pub fn generate_completions_to<G: Generator>(gen: G, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(gen, cmd, name, out);
}

/// Convert our Shell enum to clap_complete's Shell enum
pub fn shell_to_completion_shell(shell: &Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::CommandFactory;

    #[test]
    fn test_bash_script_mentions_subcommands() {
        let mut cmd = Args::command();
        let mut out = Vec::new();
        generate_completions_to(shell_to_completion_shell(&Shell::Bash), &mut cmd, &mut out);

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("_tunebook"));
        assert!(script.contains("playlist"));
        assert!(script.contains("add-playlist"));
    }

    #[test]
    fn test_every_shell_generates() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            let mut cmd = Args::command();
            let mut out = Vec::new();
            generate_completions_to(shell_to_completion_shell(&shell), &mut cmd, &mut out);
            assert!(!out.is_empty(), "{shell:?} produced no script");
        }
    }
}
