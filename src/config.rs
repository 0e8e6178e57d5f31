//! User configuration.
//!
//! Read from `<config dir>/calcflow/config.toml`. Every key is optional and
//! the file itself may be absent. Nothing is ever written back.

use crate::ui::{DEFAULT_PLOT_SIZE, Theme};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Chart width in characters.
    pub width: usize,
    /// Chart height in rows.
    pub height: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let (width, height) = DEFAULT_PLOT_SIZE;
        Self { width, height }
    }
}

impl PlotConfig {
    pub fn size(&self) -> (usize, usize) {
        (self.width.max(2), self.height.max(2))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    /// ANSI colors in terminal output.
    pub color: bool,
    pub plot: PlotConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            color: true,
            plot: PlotConfig::default(),
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calcflow")
            .join("config.toml")
    }

    /// Load from the default location, falling back to defaults when the
    /// file is missing or broken.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %format!("{:#}", err), "Using default config");
                Self::default()
            }
        }
    }

    /// Load from an explicit path. Missing or invalid files are errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }
}
