//! Application configuration, read from `config.toml` in the data directory.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::repository::file::DEFAULT_PLAN_FILE;
use crate::time::WeekStart;

const CONFIG_FILE_NAME: &str = "config.toml";
const DATA_DIR_NAME: &str = ".triplan";

/// Picks `base_dir` or `~/.triplan` and makes sure it exists.
pub fn resolve_data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match base_dir {
        Some(dir) => dir,
        None => {
            let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
            home_dir.join(DATA_DIR_NAME)
        }
    };
    fs::create_dir_all(&path)?;
    Ok(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Plan table file, relative to the data directory unless absolute.
    pub plan_file: String,
    pub week_start: WeekStart,
    pub pad_trailing_cells: bool,
    /// Refuse to start on a plan with validation issues.
    pub strict_validation: bool,
    /// Default filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plan_file: DEFAULT_PLAN_FILE.to_string(),
            week_start: WeekStart::Sunday,
            pad_trailing_cells: true,
            strict_validation: false,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn load(base_dir: Option<PathBuf>) -> Result<Config> {
        let path = resolve_data_dir(base_dir)?.join(CONFIG_FILE_NAME);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Config> {
        Ok(toml::from_str(content)?)
    }

    pub fn save(&self, base_dir: Option<PathBuf>) -> Result<()> {
        let path = resolve_data_dir(base_dir)?.join(CONFIG_FILE_NAME);
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
