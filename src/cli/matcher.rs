//! Matcher selection flags shared by the parsing commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use crate::config::{Base, Config, Options};
use crate::scanner::Matcher;
use crate::settings::Settings;

/// Flags selecting the vocabulary a matcher is built from.
#[derive(Args, Debug, Default, Clone)]
pub struct MatcherArgs {
    /// Preset to use: github, gitlab, bitbucket or default.
    #[arg(long, conflicts_with = "config")]
    pub preset: Option<String>,

    /// YAML or JSON file with options, used in place of a preset.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// YAML or JSON file with options applied on top of the preset or config.
    #[arg(long = "override", value_name = "FILE")]
    pub overrides: Option<PathBuf>,
}

impl MatcherArgs {
    /// Resolves the base: `--config`, then `--preset`, then the default preset
    /// from the environment or settings, then `default`.
    pub fn base(&self, settings: &Settings) -> Result<Base> {
        if let Some(path) = &self.config {
            let document = read_document(path)?;
            return Base::from_value(&document)
                .with_context(|| format!("Invalid configuration in {}", path.display()));
        }

        if let Some(name) = &self.preset {
            return Ok(name.parse()?);
        }

        match settings.default_preset() {
            Some(name) => name
                .parse()
                .with_context(|| format!("Invalid default preset: {name}")),
            None => Ok(Base::default()),
        }
    }

    /// Resolves the overrides: `--override`, then the settings' overrides.
    pub fn overrides(&self, settings: &Settings) -> Result<Option<Options>> {
        match &self.overrides {
            Some(path) => {
                let document = read_document(path)?;
                let overrides = Options::overrides_from_value(&document)
                    .with_context(|| format!("Invalid overrides in {}", path.display()))?;
                Ok(Some(overrides))
            }
            None => Ok(settings.overrides.clone()),
        }
    }

    /// Builds the matcher.
    pub fn build(&self, settings: &Settings) -> Result<Matcher> {
        let config = Config::resolve(self.base(settings)?, self.overrides(settings)?);
        Ok(Matcher::from_config(config)?)
    }
}

/// Reads a YAML or JSON document.
fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse file: {}", path.display()))
}
