//! User settings.
//!
//! Settings are read from `$HOME/.issue-parser/settings.json`. They supply the
//! default preset and overrides for the command line, and act as a fallback
//! for environment variables.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::Options;

/// Environment variable selecting the default preset.
pub const PRESET_ENV_VAR: &str = "ISSUE_PARSER_PRESET";

/// Settings loaded from `$HOME/.issue-parser/settings.json`.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Preset used when none is given on the command line.
    #[serde(default)]
    pub preset: Option<String>,
    /// Overrides applied when none are given on the command line.
    #[serde(default)]
    pub overrides: Option<Options>,
    /// Environment variable overrides.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from a specific path. A missing file yields defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".issue-parser").join("settings.json"))
    }

    /// Returns an environment variable with fallback to settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(_) => self.env.get(key).cloned(),
        }
    }

    /// Returns the default preset name: the environment (or the settings'
    /// `env` map) first, then the `preset` setting.
    pub fn default_preset(&self) -> Option<String> {
        self.get_env_var(PRESET_ENV_VAR)
            .filter(|name| !name.trim().is_empty())
            .or_else(|| self.preset.clone())
    }
}
