use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::core::CommandError;
use crate::cli::output;
use crate::notify::Confirmer;

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

/// Print a warning message via the standard CLI output helpers.
pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

/// Print an error message via the standard CLI output helpers.
pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(theme: &ColorfulTheme, prompt: &str, default: bool) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Prompt for free-form text, pre-filled with `initial`.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str, initial: &str) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(CommandError::from)
}

/// Prompt for one of `labels`, starting on `default`.
pub fn prompt_choice(
    theme: &ColorfulTheme,
    prompt: &str,
    labels: &[&str],
    default: usize,
) -> Result<usize, CommandError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(labels)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Terminal confirmation for destructive view actions.
pub struct DialoguerConfirmer<'a> {
    theme: &'a ColorfulTheme,
}

impl<'a> DialoguerConfirmer<'a> {
    pub fn new(theme: &'a ColorfulTheme) -> Self {
        Self { theme }
    }
}

impl Confirmer for DialoguerConfirmer<'_> {
    fn confirm(&self, prompt: &str) -> bool {
        match confirm_action(self.theme, prompt, false) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(error = %err, "confirmation prompt failed");
                false
            }
        }
    }
}
