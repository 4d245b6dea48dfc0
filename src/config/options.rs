//! Option names and raw option maps.
//!
//! An [`Options`] value is an unresolved, possibly partial set of keyword
//! lists. Untyped documents (JSON, YAML) are validated into it through
//! [`Options::from_value`]; resolution into a complete configuration happens in
//! [`crate::config::Config::resolve`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// Names of the recognized options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum OptionKey {
    /// Keywords that close an issue when followed by a reference.
    #[serde(rename = "referenceActions")]
    ReferenceActions,
    /// Keywords that mark a reference as a duplicate.
    #[serde(rename = "duplicateActions")]
    DuplicateActions,
    /// Keywords that mark the referenced issue as blocked by this one.
    #[serde(rename = "blocksActions")]
    BlocksActions,
    /// Keywords that mark the referenced issue as a requirement.
    #[serde(rename = "requiresActions")]
    RequiresActions,
    /// Keywords that mark this item as the parent of the referenced issue.
    #[serde(rename = "parentOfActions")]
    ParentOfActions,
    /// Keywords that mark this item as a child of the referenced issue.
    #[serde(rename = "childOfActions")]
    ChildOfActions,
    /// Prefixes that introduce a user mention.
    #[serde(rename = "mentionsPrefixes")]
    MentionsPrefixes,
    /// Prefixes that introduce a bare issue number.
    #[serde(rename = "issuePrefixes")]
    IssuePrefixes,
    /// Base URLs accepted in place of an issue prefix.
    #[serde(rename = "hosts")]
    Hosts,
    /// URL path segments that precede an issue number.
    #[serde(rename = "issueURLSegments")]
    IssueUrlSegments,
}

impl OptionKey {
    /// All option names, in documentation order.
    pub const ALL: [Self; 10] = [
        Self::ReferenceActions,
        Self::DuplicateActions,
        Self::BlocksActions,
        Self::RequiresActions,
        Self::ParentOfActions,
        Self::ChildOfActions,
        Self::MentionsPrefixes,
        Self::IssuePrefixes,
        Self::Hosts,
        Self::IssueUrlSegments,
    ];

    /// Returns the name used in configuration documents.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReferenceActions => "referenceActions",
            Self::DuplicateActions => "duplicateActions",
            Self::BlocksActions => "blocksActions",
            Self::RequiresActions => "requiresActions",
            Self::ParentOfActions => "parentOfActions",
            Self::ChildOfActions => "childOfActions",
            Self::MentionsPrefixes => "mentionsPrefixes",
            Self::IssuePrefixes => "issuePrefixes",
            Self::Hosts => "hosts",
            Self::IssueUrlSegments => "issueURLSegments",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownOption(s.to_string()))
    }
}

/// A partial set of option lists.
///
/// Keys that are absent leave the value of an earlier source untouched when
/// option sets are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "BTreeMap<OptionKey, Vec<String>>")]
pub struct Options {
    values: BTreeMap<OptionKey, Vec<String>>,
}

impl Options {
    /// Creates an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one option, replacing any previous value.
    #[must_use]
    pub fn set<I, S>(mut self, key: OptionKey, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values
            .insert(key, values.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the value of one option, if set.
    pub fn get(&self, key: OptionKey) -> Option<&[String]> {
        self.values.get(&key).map(Vec::as_slice)
    }

    /// Removes and returns the value of one option.
    pub(crate) fn take(&mut self, key: OptionKey) -> Option<Vec<String>> {
        self.values.remove(&key)
    }

    /// Shallow-merges `other` over `self`; keys set in `other` win.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.values.extend(other.values);
        self
    }

    /// Validates an untyped document used as base options.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(map) => Self::from_mapping(map),
            _ => Err(ConfigError::InvalidBase),
        }
    }

    /// Validates an untyped document used as overrides.
    pub fn overrides_from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(map) => Self::from_mapping(map),
            _ => Err(ConfigError::InvalidOverrides),
        }
    }

    fn from_mapping(map: &serde_json::Map<String, Value>) -> Result<Self, ConfigError> {
        let mut values = BTreeMap::new();
        for (name, value) in map {
            let key: OptionKey = name.parse()?;
            values.insert(key, option_values(key, value)?);
        }
        Ok(Self { values })
    }
}

impl TryFrom<Value> for Options {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl From<Options> for BTreeMap<OptionKey, Vec<String>> {
    fn from(options: Options) -> Self {
        options.values
    }
}

/// Coerces one option value into a list of strings.
fn option_values(key: OptionKey, value: &Value) -> Result<Vec<String>, ConfigError> {
    let invalid = || ConfigError::InvalidOptionType {
        option: key.to_string(),
    };

    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
            .collect(),
        _ => Err(invalid()),
    }
}
