//! Hosting provider presets loaded from the embedded YAML table.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use anyhow::{Context, Result};

use super::options::Options;
use crate::error::ConfigError;

/// Embedded preset table.
pub const PRESETS_YAML: &str = include_str!("../templates/presets.yaml");

/// A named keyword vocabulary matching a hosting provider's conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    /// GitHub closing keywords, `#`/`gh-` prefixes and github.com URLs.
    GitHub,
    /// GitLab closing keywords, `#`/`!` prefixes and gitlab.com URLs.
    GitLab,
    /// Bitbucket closing keywords and `#` prefixes.
    Bitbucket,
    /// Union of the GitHub and GitLab conventions.
    #[default]
    Default,
}

impl Preset {
    /// All presets, in listing order.
    pub const ALL: [Self; 4] = [Self::GitHub, Self::GitLab, Self::Bitbucket, Self::Default];

    /// Returns the lowercase preset name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Bitbucket => "bitbucket",
            Self::Default => "default",
        }
    }

    /// Returns the options this preset defines.
    pub fn options(self) -> Options {
        registry().presets.get(&self).cloned().unwrap_or_default()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

/// Parsed preset table.
struct PresetRegistry {
    presets: HashMap<Preset, Options>,
}

impl PresetRegistry {
    fn load() -> Result<Self> {
        let raw: BTreeMap<String, serde_json::Value> =
            serde_yaml::from_str(PRESETS_YAML).context("Failed to parse embedded presets")?;

        let mut presets = HashMap::new();
        for (name, value) in &raw {
            let preset: Preset = name.parse()?;
            let options = Options::from_value(value)
                .with_context(|| format!("Invalid options for preset '{name}'"))?;
            presets.insert(preset, options);
        }

        for preset in Preset::ALL {
            if !presets.contains_key(&preset) {
                anyhow::bail!("Embedded presets are missing '{preset}'");
            }
        }

        Ok(Self { presets })
    }
}

static PRESET_REGISTRY: OnceLock<PresetRegistry> = OnceLock::new();

#[allow(clippy::expect_used)] // Embedded data, covered by tests
fn registry() -> &'static PresetRegistry {
    PRESET_REGISTRY.get_or_init(|| PresetRegistry::load().expect("Failed to load presets"))
}
