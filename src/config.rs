//! Configuration resolution.
//!
//! A configuration is resolved in three layers: the built-in `default` preset,
//! then the base (a named preset or caller options), then optional overrides.
//! Each layer replaces whole options; lists are never concatenated.

use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::data::Category;
use crate::error::ConfigError;

pub mod options;
pub mod presets;

pub use options::{OptionKey, Options};
pub use presets::{Preset, PRESETS_YAML};

/// Base configuration a matcher is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base {
    /// A named preset.
    Preset(Preset),
    /// Caller-supplied options, merged over the default preset.
    Options(Options),
}

impl Default for Base {
    fn default() -> Self {
        Self::Preset(Preset::Default)
    }
}

impl From<Preset> for Base {
    fn from(preset: Preset) -> Self {
        Self::Preset(preset)
    }
}

impl From<Options> for Base {
    fn from(options: Options) -> Self {
        Self::Options(options)
    }
}

impl FromStr for Base {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::Preset)
    }
}

impl Base {
    /// Interprets an untyped document: a string names a preset, a mapping
    /// holds options, anything else is rejected.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::String(name) => name.parse(),
            Value::Object(_) => Options::from_value(value).map(Self::Options),
            _ => Err(ConfigError::InvalidBase),
        }
    }

    fn into_options(self) -> Options {
        match self {
            Self::Preset(preset) => preset.options(),
            Self::Options(options) => options,
        }
    }
}

/// A fully resolved configuration.
///
/// Every list holds only non-empty entries. Hosts end with exactly one `/` and
/// URL segments carry no surrounding `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Keywords that close the referenced issue.
    pub reference_actions: Vec<String>,
    /// Keywords that mark the referenced issue as a duplicate.
    pub duplicate_actions: Vec<String>,
    /// Keywords for "blocks" relations.
    pub blocks_actions: Vec<String>,
    /// Keywords for "requires" relations.
    pub requires_actions: Vec<String>,
    /// Keywords for "parent of" relations.
    pub parent_of_actions: Vec<String>,
    /// Keywords for "child of" relations.
    pub child_of_actions: Vec<String>,
    /// Prefixes introducing a user mention.
    pub mentions_prefixes: Vec<String>,
    /// Prefixes introducing a bare issue number.
    pub issue_prefixes: Vec<String>,
    /// Base URLs accepted in place of an issue prefix.
    pub hosts: Vec<String>,
    /// URL path segments preceding an issue number.
    #[serde(rename = "issueURLSegments")]
    pub issue_url_segments: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(Base::default(), None)
    }
}

impl Config {
    /// Resolves a base and optional overrides over the default preset.
    pub fn resolve(base: Base, overrides: Option<Options>) -> Self {
        let mut options = Preset::Default.options().merge(base.into_options());
        if let Some(overrides) = overrides {
            options = options.merge(overrides);
        }

        let mut list = |key: OptionKey| -> Vec<String> {
            options
                .take(key)
                .unwrap_or_default()
                .into_iter()
                .filter(|value| !value.is_empty())
                .collect()
        };

        Self {
            reference_actions: list(OptionKey::ReferenceActions),
            duplicate_actions: list(OptionKey::DuplicateActions),
            blocks_actions: list(OptionKey::BlocksActions),
            requires_actions: list(OptionKey::RequiresActions),
            parent_of_actions: list(OptionKey::ParentOfActions),
            child_of_actions: list(OptionKey::ChildOfActions),
            mentions_prefixes: list(OptionKey::MentionsPrefixes),
            issue_prefixes: list(OptionKey::IssuePrefixes),
            hosts: list(OptionKey::Hosts)
                .iter()
                .filter_map(|host| normalize_host(host))
                .collect(),
            issue_url_segments: list(OptionKey::IssueUrlSegments)
                .iter()
                .filter_map(|segment| normalize_segment(segment))
                .collect(),
        }
    }

    /// Returns the resolved list for one option.
    pub fn get(&self, key: OptionKey) -> &[String] {
        match key {
            OptionKey::ReferenceActions => &self.reference_actions,
            OptionKey::DuplicateActions => &self.duplicate_actions,
            OptionKey::BlocksActions => &self.blocks_actions,
            OptionKey::RequiresActions => &self.requires_actions,
            OptionKey::ParentOfActions => &self.parent_of_actions,
            OptionKey::ChildOfActions => &self.child_of_actions,
            OptionKey::MentionsPrefixes => &self.mentions_prefixes,
            OptionKey::IssuePrefixes => &self.issue_prefixes,
            OptionKey::Hosts => &self.hosts,
            OptionKey::IssueUrlSegments => &self.issue_url_segments,
        }
    }

    /// Returns the keywords of one action category.
    pub fn actions(&self, category: Category) -> &[String] {
        self.get(category.option_key())
    }

    /// Returns every action keyword, in category priority order.
    pub fn all_actions(&self) -> impl Iterator<Item = &str> {
        Category::PRIORITY
            .into_iter()
            .flat_map(move |category| self.actions(category))
            .map(String::as_str)
    }
}

/// Ensures a host ends with exactly one `/`.
fn normalize_host(host: &str) -> Option<String> {
    let trimmed = host.trim_end_matches('/');
    (!trimmed.is_empty()).then(|| format!("{trimmed}/"))
}

/// Strips surrounding `/` from a URL segment.
fn normalize_segment(segment: &str) -> Option<String> {
    let trimmed = segment.trim_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
