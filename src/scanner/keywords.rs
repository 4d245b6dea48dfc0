//! Case-insensitive keyword lookups, built once per matcher.
//!
//! Lookups fold case with the same rules as the scanning patterns, so any
//! keyword a pattern matches is found here too.

use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};

use crate::config::Config;
use crate::data::Category;
use crate::error::ConfigError;

fn alternation<I, S>(values: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let escaped: Vec<String> = values
        .into_iter()
        .filter(|value| !value.as_ref().is_empty())
        .map(|value| regex::escape(value.as_ref()))
        .collect();
    (!escaped.is_empty()).then(|| escaped.join("|"))
}

fn folded(pattern: &str) -> Result<Regex, ConfigError> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

/// Maps action keywords to their category.
#[derive(Debug, Clone)]
pub struct KeywordIndex {
    categories: Vec<Category>,
    set: RegexSet,
}

impl KeywordIndex {
    /// Indexes every action keyword of `config`. A keyword listed under several
    /// categories keeps the one that comes first in [`Category::PRIORITY`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let mut categories = Vec::new();
        let mut patterns = Vec::new();
        for category in Category::PRIORITY {
            if let Some(keywords) = alternation(config.actions(category)) {
                categories.push(category);
                patterns.push(format!("^(?:{keywords})$"));
            }
        }

        let set = RegexSetBuilder::new(&patterns)
            .case_insensitive(true)
            .build()?;
        Ok(Self { categories, set })
    }

    /// Returns the category of a matched keyword.
    pub fn category(&self, keyword: &str) -> Option<Category> {
        // Set indices come back in ascending order, i.e. by priority.
        let index = self.set.matches(keyword).iter().next()?;
        self.categories.get(index).copied()
    }
}

/// A case-insensitive set of literal strings.
#[derive(Debug, Clone, Default)]
pub struct FoldedSet {
    exact: Option<Regex>,
    any: Option<Regex>,
}

impl FoldedSet {
    /// Builds the set from `values`. Empty values are ignored.
    pub fn new<I, S>(values: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(alternation) = alternation(values) else {
            return Ok(Self::default());
        };
        Ok(Self {
            exact: Some(folded(&format!("^(?:{alternation})$"))?),
            any: Some(folded(&alternation)?),
        })
    }

    /// Returns true when `value` is in the set, ignoring case.
    pub fn contains(&self, value: &str) -> bool {
        self.exact.as_ref().is_some_and(|exact| exact.is_match(value))
    }

    /// Returns the byte offset of the leftmost occurrence in `text` of any
    /// value, ignoring case.
    pub fn find(&self, text: &str) -> Option<usize> {
        self.any.as_ref()?.find(text).map(|m| m.start())
    }
}
