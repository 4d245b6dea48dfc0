//! Text scanning.

use regex::Captures;

use crate::config::{Base, Config, Options};
use crate::data::{Mention, ParseResult, Reference};
use crate::error::{ConfigError, InputError};
use crate::pattern::{self, groups, CompiledPatterns};

pub mod code;
pub mod keywords;

use keywords::{FoldedSet, KeywordIndex};

/// A configured reference scanner.
///
/// Building a matcher resolves the configuration and compiles its patterns
/// once; [`Matcher::parse`] can then be called any number of times, from any
/// number of threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    config: Config,
    patterns: CompiledPatterns,
    keywords: KeywordIndex,
    issue_prefixes: FoldedSet,
    hosts: FoldedSet,
    reject_blank: bool,
}

impl Matcher {
    /// Builds a matcher from a preset or a set of options.
    pub fn new(base: impl Into<Base>) -> Result<Self, ConfigError> {
        Self::from_config(Config::resolve(base.into(), None))
    }

    /// Builds a matcher from a preset name, e.g. `"github"`.
    pub fn named(preset: &str) -> Result<Self, ConfigError> {
        Self::new(preset.parse::<Base>()?)
    }

    /// Builds a matcher from a base and overrides applied on top of it.
    pub fn with_overrides(base: impl Into<Base>, overrides: Options) -> Result<Self, ConfigError> {
        Self::from_config(Config::resolve(base.into(), Some(overrides)))
    }

    /// Builds a matcher from an already resolved configuration.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let patterns = pattern::compile(&config)?;
        let keywords = KeywordIndex::new(&config)?;
        let issue_prefixes = FoldedSet::new(&config.issue_prefixes)?;
        let hosts = FoldedSet::new(&config.hosts)?;

        Ok(Self {
            config,
            patterns,
            keywords,
            issue_prefixes,
            hosts,
            reject_blank: false,
        })
    }

    /// Makes [`Matcher::parse`] fail with [`InputError::Blank`] on empty or
    /// whitespace-only text instead of returning an empty result.
    #[must_use]
    pub fn reject_blank(mut self, reject: bool) -> Self {
        self.reject_blank = reject;
        self
    }

    /// Returns the resolved configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the compiled patterns.
    pub fn patterns(&self) -> &CompiledPatterns {
        &self.patterns
    }

    /// Scans `text` for references and mentions. Code regions are ignored.
    pub fn parse(&self, text: &str) -> Result<ParseResult, InputError> {
        if text.trim().is_empty() {
            if self.reject_blank {
                return Err(InputError::Blank);
            }
            return Ok(ParseResult::default());
        }

        let mut result = ParseResult::default();
        let Some(main) = self.patterns.main() else {
            return Ok(result);
        };

        let text = code::strip_code_regions(text);
        for caps in main.captures_iter(&text) {
            self.classify(&caps, &mut result);
        }

        tracing::debug!(
            actions = result.actions.len(),
            refs = result.refs.len(),
            duplicates = result.duplicates.len(),
            relations = result.blocks.len()
                + result.requires.len()
                + result.parent_of.len()
                + result.child_of.len(),
            mentions = result.mentions.len(),
            "Parsed text"
        );

        Ok(result)
    }

    /// Scans UTF-8 encoded `bytes`.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParseResult, InputError> {
        let text = std::str::from_utf8(bytes).map_err(|e| InputError::InvalidUtf8 {
            offset: e.valid_up_to(),
        })?;
        self.parse(text)
    }

    fn classify(&self, caps: &Captures<'_>, result: &mut ParseResult) {
        if caps.name(groups::ISSUE).is_some() {
            let mut reference = self.reference(caps);
            let category = caps
                .name(groups::ACTION)
                .and_then(|action| self.keywords.category(action.as_str()));
            tracing::trace!(raw = %reference.raw, ?category, "Matched reference");

            match category {
                Some(category) => result.category_mut(category).push(reference),
                None => {
                    reference.action = None;
                    result.refs.push(reference);
                }
            }
        } else if let Some(run) = caps.name(groups::MENTIONS) {
            tracing::trace!(raw = run.as_str(), "Matched mentions");
            self.push_mentions(run.as_str(), &mut result.mentions);
        }
    }

    fn reference(&self, caps: &Captures<'_>) -> Reference {
        let text = caps.get(0).map_or("", |m| m.as_str());
        let action = caps.name(groups::ACTION).map(|m| m.as_str());
        let slug = caps.name(groups::SLUG).map(|m| m.as_str());
        let prefix = caps.name(groups::PREFIX).map(|m| m.as_str());
        let issue = caps.name(groups::ISSUE).map_or("", |m| m.as_str());

        // The match may begin with separators; `raw` starts at the first
        // meaningful token.
        let start = action
            .and_then(|action| text.find(action))
            .or_else(|| self.hosts.find(text))
            .or_else(|| slug.and_then(|slug| text.find(slug)))
            .or_else(|| prefix.and_then(|prefix| text.find(prefix)))
            .unwrap_or(0);

        Reference {
            raw: text[start..].to_string(),
            action: action.map(capitalize),
            slug: slug.map(str::to_string),
            prefix: prefix
                .filter(|prefix| self.issue_prefixes.contains(prefix))
                .map(str::to_string),
            issue: issue.to_string(),
        }
    }

    fn push_mentions(&self, run: &str, mentions: &mut Vec<Mention>) {
        let Some(pattern) = self.patterns.mention() else {
            return;
        };

        for caps in pattern.captures_iter(run) {
            let (Some(prefix), Some(user)) = (caps.name(groups::PREFIX), caps.name(groups::USER))
            else {
                continue;
            };
            mentions.push(Mention {
                raw: run[prefix.start()..user.end()].to_string(),
                prefix: prefix.as_str().to_string(),
                user: user.as_str().to_string(),
            });
        }
    }
}

/// Uppercases the first character and lowercases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
