//! Configuration loading

use crate::{models::StopwatchConfig, Result};
use std::path::{Path, PathBuf};

pub struct ConfigStorage {
    config_path: PathBuf,
}

impl ConfigStorage {
    /// Storage reading `config.json` from `config_dir`.
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self::from_file(config_dir.as_ref().join("config.json"))
    }

    pub fn from_file(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load and validate the config. A missing or empty file yields the
    /// defaults; nothing is written back.
    pub fn load(&self) -> Result<StopwatchConfig> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(StopwatchConfig::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;

        if content.trim().is_empty() {
            return Ok(StopwatchConfig::default());
        }

        let config: StopwatchConfig = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::debug!(path = %self.config_path.display(), ?config, "Loaded config");
        Ok(config)
    }
}
