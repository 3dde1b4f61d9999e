pub mod category;
pub mod system;

use strsim::levenshtein;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Category commands first so `help` lists them before the shell plumbing.
pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    category::definitions()
        .into_iter()
        .chain(system::definitions())
        .collect()
}

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            description,
            usage,
            handler,
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    fn answers_to(&self, word: &str) -> bool {
        self.name == word || self.aliases.contains(&word)
    }
}

/// Ordered command table; lookups are case-insensitive and accept aliases.
pub struct CommandRegistry {
    definitions: Vec<CommandDefinition>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        Self { definitions }
    }

    pub fn get(&self, word: &str) -> Option<&CommandDefinition> {
        let word = word.to_ascii_lowercase();
        self.definitions
            .iter()
            .find(|definition| definition.answers_to(&word))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.definitions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions.iter().map(|definition| definition.name)
    }

    /// Closest command name within three edits of `word`.
    pub fn closest(&self, word: &str) -> Option<&'static str> {
        let word = word.to_ascii_lowercase();
        self.names()
            .map(|name| (levenshtein(name, &word), name))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}
