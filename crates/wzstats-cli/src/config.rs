//! Application configuration management.
//!
//! Configuration is stored at `~/.config/wzstats/config.json` and holds the
//! storage location, the platform assumed when none is given, and whether
//! logs also go to a file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wzstats_core::Platform;

/// Application name used for config/data directory paths
const APP_NAME: &str = "wzstats";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment override for the data directory
const DATA_DIR_ENV: &str = "WZSTATS_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub default_platform: Option<String>,
    #[serde(default)]
    pub log_to_file: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// `WZSTATS_DATA_DIR`, then the configured directory, then the platform
    /// data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn default_platform(&self) -> Option<Platform> {
        self.default_platform.as_deref().and_then(|p| p.parse().ok())
    }
}
