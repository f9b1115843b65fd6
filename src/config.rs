//! Run configuration
//!
//! Settings come from an optional TOML file. The file is looked up at the
//! path given on the command line, then `$SCRAPEYARD_CONFIG`, then
//! `<config dir>/scrapeyard/config.toml`. Every key is optional and falls
//! back to the built-in default.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ScrapeError;
use crate::fetch::SPOOFED_USER_AGENT;
use crate::pricing::{self, coinmarketcap};
use crate::rentals;

pub const CONFIG_ENV_VAR: &str = "SCRAPEYARD_CONFIG";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tickers quoted by the price report
    pub tickers: Vec<String>,
    /// ZIP code searched by the rental report
    pub zip_code: String,
    /// User agent sent with listing requests
    pub user_agent: String,
    pub prices_base_url: String,
    pub rentals_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tickers: pricing::DEFAULT_TICKERS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            zip_code: rentals::DEFAULT_ZIP_CODE.to_string(),
            user_agent: SPOOFED_USER_AGENT.to_string(),
            prices_base_url: coinmarketcap::DEFAULT_BASE_URL.to_string(),
            rentals_base_url: rentals::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ScrapeError::Config(e.to_string()))
            .context("Failed to parse configuration")?;
        if config.zip_code.trim().is_empty() {
            return Err(ScrapeError::Config("zip_code must not be empty".to_string()).into());
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Resolve and load the configuration.
    ///
    /// An explicitly named file (flag or environment) must exist; the default
    /// location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
            let path = PathBuf::from(path);
            debug!("Loading config from ${} = {}", CONFIG_ENV_VAR, path.display());
            return Self::from_file(&path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dir_spec::config_home)
        .map(|dir| dir.join("scrapeyard").join(CONFIG_FILENAME))
}
