//! User configuration.
//!
//! Loaded from `config.toml` in the platform config directory. Every field is
//! optional and a missing file simply means defaults.

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::desk::timer::{DEFAULT_MINUTES, valid_minutes};

pub const APP_NAME: &str = "focusdesk";
pub const CONFIG_FILE: &str = "config.toml";
/// Overrides the data directory, like `data_dir` in the config file.
pub const DATA_DIR_ENV: &str = "FOCUSDESK_DIR";
/// Number keys 1-9 select presets, so that is the most we keep.
pub const MAX_PRESETS: usize = 9;

const DEFAULT_PRESETS: [u32; 5] = [5, 10, 15, 25, 45];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    pub notifications: bool,
    #[serde(rename = "default_minutes")]
    pub raw_default_minutes: u32,
    #[serde(rename = "presets")]
    pub raw_presets: Vec<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "info".to_string(),
            notifications: true,
            raw_default_minutes: DEFAULT_MINUTES,
            raw_presets: DEFAULT_PRESETS.to_vec(),
        }
    }
}

impl Config {
    /// Loads the config from the default location.
    pub fn load() -> Result<Config> {
        let path = default_config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Starting countdown length, falling back to 25 minutes when out of range.
    pub fn default_minutes(&self) -> u32 {
        if valid_minutes(self.raw_default_minutes) {
            self.raw_default_minutes
        } else {
            warn!(
                "default_minutes {} is outside 1-999, using {}",
                self.raw_default_minutes, DEFAULT_MINUTES
            );
            DEFAULT_MINUTES
        }
    }

    /// Valid presets in configured order, duplicates removed, at most nine.
    pub fn presets(&self) -> Vec<u32> {
        let mut presets: Vec<u32> = Vec::new();
        for &minutes in &self.raw_presets {
            if !valid_minutes(minutes) {
                warn!("ignoring preset {} (must be 1-999 minutes)", minutes);
                continue;
            }
            if !presets.contains(&minutes) {
                presets.push(minutes);
            }
        }
        if presets.len() > MAX_PRESETS {
            warn!("only the first {} presets are used", MAX_PRESETS);
            presets.truncate(MAX_PRESETS);
        }
        presets
    }

    /// Resolves where tasks, theme and logs live.
    ///
    /// The environment override wins over the config file, which wins over
    /// the platform data directory.
    pub fn resolve_data_dir(&self, env_override: Option<String>) -> Result<PathBuf> {
        if let Some(dir) = env_override.filter(|d| !d.trim().is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir().context("Could not determine data directory")?;
        Ok(base.join(APP_NAME))
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
}
