//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::editor::{DEFAULT_AUTOSAVE_DELAY, DEFAULT_SAFETY_NET_INTERVAL, EditorConfig};

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Path of the JSON store file
    pub store: Option<PathBuf>,

    /// Quiet period before an edit is auto-saved, in milliseconds
    pub autosave_delay_ms: Option<u64>,

    /// Period of the safety-net save, in seconds
    pub safety_net_secs: Option<u64>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/jotter/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jotter")
            .join("config.toml")
    }

    /// Resolve the store file, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--store` argument
    /// 2. Config file `store` setting
    /// 3. `<data_dir>/jotter/notes.json`
    pub fn store_path(&self, cli_store: Option<&PathBuf>) -> PathBuf {
        cli_store
            .cloned()
            .or_else(|| self.store.clone())
            .unwrap_or_else(Self::default_store_path)
    }

    /// Returns the default store file location.
    pub fn default_store_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jotter")
            .join("notes.json")
    }

    /// Timer settings for the editor, falling back to the defaults.
    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            autosave_delay: self
                .autosave_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_AUTOSAVE_DELAY),
            safety_net_interval: self
                .safety_net_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_SAFETY_NET_INTERVAL),
        }
    }
}
