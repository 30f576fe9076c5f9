use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, StatsError};
use crate::models::TimeRange;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Aggregate recipe and postcode statistics from a delivery data file
#[derive(Parser, Debug, Clone)]
#[command(
    name = "recipe-stats",
    about = "Aggregate recipe and postcode statistics from a delivery data file",
    version
)]
pub struct Settings {
    /// Path to the JSON configuration file
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Data file to read instead of the one named in the configuration
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Pretty-print the report JSON
    #[arg(long)]
    pub pretty: bool,
}

impl Settings {
    /// Parse CLI arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Load the configuration file and apply the `--data` override.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_from(&self.config)?;
        if let Some(data) = &self.data {
            config.path = data.clone();
        }
        Ok(config)
    }
}

// ── Config file ────────────────────────────────────────────────────────────────

/// Contents of the JSON configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the delivery data file.
    pub path: PathBuf,
    pub filter: SearchFilter,
}

/// Postcode, hour window and recipe words the report is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub postcode: String,
    pub am: u32,
    pub pm: u32,
    #[serde(default)]
    pub recipe_names: Vec<String>,
}

impl SearchFilter {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.am, self.pm)
    }
}

impl Config {
    /// Read and parse the configuration at `path`.
    ///
    /// Unlike the data file, a missing or malformed config is always an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| StatsError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&content)?;
        if config.path.as_os_str().is_empty() {
            return Err(StatsError::Config("`path` must not be empty".to_string()));
        }
        Ok(config)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
