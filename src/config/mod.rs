use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::core::utils::{ensure_dir, write_atomic, PathResolver};
use crate::errors::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Overrides the category store location; defaults to `<app dir>/categories.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_file: Option<PathBuf>,
    #[serde(default)]
    pub plain_mode: bool,
    #[serde(default)]
    pub screen_reader_mode: bool,
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    /// Category store file for the given configuration.
    pub fn store_path(&self, config: &Config) -> PathBuf {
        config
            .store_file
            .clone()
            .unwrap_or_else(|| PathResolver::store_file_in(&self.base))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
