//! Line-oriented driver for the category commands: a rustyline prompt for terminals and
//! a plain stdin reader for scripts.

use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Cmd, Context, Editor, Helper, Highlighter, Hinter, KeyEvent, Validator,
};

use crate::cli::commands::category::render_list;
use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext};
use crate::cli::io as cli_io;
use crate::domain::CategoryKind;

/// Environment switch for non-interactive runs that read commands from stdin.
pub const SCRIPT_ENV: &str = "CATEGORY_MANAGER_CLI_SCRIPT";

const FORM_FIELDS: [&str; 4] = ["name", "type", "color", "default"];
const ASSIGNMENTS: [&str; 4] = ["name=", "type=", "color=", "default="];
const FLAGS: [&str; 2] = ["true", "false"];

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::info!(?mode, "category shell started");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CategoryCompleter, DefaultHistory>::new()?;
    editor.set_helper(Some(CategoryCompleter::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    cli_io::print_info("Category manager. Type `help` to see available commands.");
    render_list(context);

    loop {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.trim());
                }
                if execute(context, &line) == LoopControl::Exit {
                    break;
                }
            }
            // Ctrl-C backs out of an open form before it offers to leave the shell.
            Err(ReadlineError::Interrupted) if context.view.cancel_modal() => {
                cli_io::print_info("Form closed without saving.");
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                cli_io::print_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        if execute(context, &line?) == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Runs one input line. Blank lines and `#` comments are skipped; command failures are
/// reported here and never end the session.
fn execute(context: &mut ShellContext, line: &str) -> LoopControl {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return LoopControl::Continue;
    }
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            cli_io::print_warning(format!("Could not read `{}`: {}", line, err));
            return LoopControl::Continue;
        }
    };
    let Some((word, rest)) = tokens.split_first() else {
        return LoopControl::Continue;
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    context.last_command = Some(line.to_string());
    match context.dispatch(word, &args) {
        Ok(control) => control,
        Err(err) => {
            context.report_error(err);
            LoopControl::Continue
        }
    }
}

/// Tab completion for command names, form fields and their fixed values.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct CategoryCompleter {
    commands: Vec<&'static str>,
}

impl CategoryCompleter {
    fn new(mut commands: Vec<&'static str>) -> Self {
        commands.sort_unstable();
        Self { commands }
    }

    /// Candidates for the last word of `line`, with the byte offset where it starts.
    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        let start = line.rfind(char::is_whitespace).map_or(0, |idx| idx + 1);
        let current = line[start..].to_ascii_lowercase();
        let before: Vec<String> = line[..start]
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();
        let kinds = CategoryKind::ALL.into_iter().map(|kind| kind.value());

        let pool: Vec<String> = match before.iter().map(String::as_str).collect::<Vec<_>>()[..] {
            [] | ["help"] => self.commands.iter().map(|name| name.to_string()).collect(),
            ["set"] => owned(&FORM_FIELDS),
            ["set", "type"] => kinds.map(str::to_string).collect(),
            ["set", "default"] => owned(&FLAGS),
            ["config"] => owned(&["plain", "screen-reader"]),
            ["config", _] => owned(&["on", "off"]),
            ["add" | "new" | "edit", ..] => match current.split_once('=') {
                Some(("type", _)) => kinds.map(|kind| format!("type={kind}")).collect(),
                Some(("default", _)) => FLAGS.iter().map(|flag| format!("default={flag}")).collect(),
                Some(_) => Vec::new(),
                None => owned(&ASSIGNMENTS),
            },
            _ => Vec::new(),
        };
        let matches = pool
            .into_iter()
            .filter(|candidate| candidate.starts_with(&current))
            .collect();
        (start, matches)
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

impl Completer for CategoryCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.candidates(&line[..pos]);
        let pairs = words
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completer() -> CategoryCompleter {
        CategoryCompleter::new(vec!["list", "delete", "edit", "exit", "set", "save"])
    }

    #[test]
    fn completes_command_names() {
        assert_eq!(completer().candidates("e"), (0, vec!["edit".into(), "exit".into()]));
        assert_eq!(completer().candidates("help s").1, vec!["save", "set"]);
    }

    #[test]
    fn completes_form_fields_and_values() {
        assert_eq!(completer().candidates("set c"), (4, vec!["color".into()]));
        assert_eq!(
            completer().candidates("set type "),
            (9, vec!["expense".into(), "income".into()])
        );
        assert_eq!(
            completer().candidates("add Rent type=i").1,
            vec!["type=income"]
        );
        assert_eq!(completer().candidates("edit 2 d").1, vec!["default="]);
        assert!(completer().candidates("delete 1").1.is_empty());
    }

    #[test]
    fn quoted_names_stay_together() {
        let tokens = shell_words::split(r#"add "Eating out" type=expense"#).unwrap();
        assert_eq!(tokens, vec!["add", "Eating out", "type=expense"]);
    }
}
