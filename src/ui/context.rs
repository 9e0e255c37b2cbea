//! Terminal detection for the label tool

use std::io::IsTerminal;

/// Environment variables set by common CI systems
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "JENKINS_URL",
    "BUILDKITE",
    "TF_BUILD",
];

/// Forces plain output even on a terminal
const PLAIN_VAR: &str = "SKULABEL_PLAIN";

/// How the current process talks to the operator
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Prompts can be answered (stdin is a terminal)
    prompts: bool,
    /// Spinners and clack-style lines (stdout is a terminal)
    fancy: bool,
    /// `--yes` given
    auto_yes: bool,
}

impl UiContext {
    pub fn detect() -> Self {
        let automated = std::env::var_os(PLAIN_VAR).is_some()
            || CI_VARS.iter().any(|var| std::env::var_os(var).is_some());
        let stdout_tty = std::io::stdout().is_terminal();
        let stdin_tty = std::io::stdin().is_terminal();

        Self {
            prompts: !automated && stdin_tty && stdout_tty,
            fancy: !automated && stdout_tty,
            auto_yes: false,
        }
    }

    /// Plain output, no prompts (tests, pipes)
    pub fn non_interactive() -> Self {
        Self {
            prompts: false,
            fancy: false,
            auto_yes: false,
        }
    }

    pub fn with_auto_yes(mut self, yes: bool) -> Self {
        self.auto_yes = yes;
        self
    }

    /// Whether the operator can answer a prompt
    pub fn is_interactive(&self) -> bool {
        self.prompts
    }

    pub fn auto_yes(&self) -> bool {
        self.auto_yes
    }

    /// Whether spinners and styled clack output are wanted
    pub fn use_fancy_output(&self) -> bool {
        self.fancy
    }
}
