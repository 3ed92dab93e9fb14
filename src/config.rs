//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.gamesales.toml` files.

use crate::analysis::DEFAULT_TOP_N;
use crate::loader::{DEFAULT_ARRAY_KEY, DEFAULT_DATA_FILE};
use crate::report::ReportOptions;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".gamesales.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Input data settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Where the sales records come from.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Path of the JSON document.
    #[serde(default = "default_data_file")]
    pub file: PathBuf,

    /// Key of the array holding the records.
    #[serde(default = "default_array_key")]
    pub array_key: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file: default_data_file(),
            array_key: default_array_key(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_array_key() -> String {
    DEFAULT_ARRAY_KEY.to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Number of entries in each ranking.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Column width of game names in rankings.
    #[serde(default = "default_name_width")]
    pub name_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            name_width: default_name_width(),
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_name_width() -> usize {
    30
}

impl From<&ReportConfig> for ReportOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            top_n: config.top_n,
            name_width: config.name_width,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data) = args.data {
            self.data.file = data.clone();
        }

        if let Some(top) = args.top {
            self.report.top_n = top;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check the merged settings.
    pub fn validate(&self) -> Result<()> {
        if self.report.top_n == 0 {
            bail!("Ranking size (report.top_n) must be at least 1");
        }

        if self.data.array_key.is_empty() {
            bail!("Record key (data.array_key) must not be empty");
        }

        Ok(())
    }
}
