use std::sync::Arc;

use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    storage::json_backend::JsonCategoryService,
    views::CategoryListView,
};

use super::commands::{all_definitions, CommandRegistry};
use super::core::CliError;
use super::output::{self, ConsoleNotifier, OutputPreferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub view: CategoryListView,
    pub last_command: Option<String>,
}

impl ShellContext {
    /// Loads configuration, opens the category store and mounts the list view.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences::from(&config));

        let store_path = config_manager.store_path(&config);
        tracing::debug!(path = %store_path.display(), ?mode, "opening category store");
        let service = Arc::new(JsonCategoryService::new(store_path));
        let mut view = CategoryListView::new(service, Arc::new(ConsoleNotifier));
        view.mount();

        Ok(Self {
            mode,
            registry: CommandRegistry::new(all_definitions()),
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            view,
            last_command: None,
        })
    }

    pub fn prompt(&self) -> String {
        match self.view.modal() {
            Some(modal) => format!("categories/{}> ", modal.title().to_ascii_lowercase()),
            None => "categories> ".to_string(),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }
}
