//! User configuration loaded from a TOML file.
//!
//! Every field has a default, so an empty or missing file yields the stock
//! behavior.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::calculator::{Evaluator, UnknownChars};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub evaluator: EvaluatorConfig,
}

/// How the keypad screen renders its state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Shown when nothing has been typed yet.
    pub placeholder: String,
    /// Shown for every failed evaluation, whatever the cause.
    pub error_message: String,
    pub thousands_separator: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder: "0".to_string(),
            error_message: "Error".to_string(),
            thousands_separator: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub unknown_chars: UnknownChars,
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit `path` must exist. Without one, the file in the user config
    /// directory is used if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.evaluator.unknown_chars)
    }
}

/// `<config dir>/stackcalc/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stackcalc").join("config.toml"))
}
