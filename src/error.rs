//! Error types for configuration resolution and text scanning.

use thiserror::Error;

/// Errors raised while resolving options or compiling patterns.
///
/// Every variant is produced before any text is scanned.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The base options named a preset that does not exist.
    #[error("unknown preset '{0}'\n  hint: valid presets are: github, gitlab, bitbucket, default")]
    UnknownPreset(String),

    /// The base options were neither a preset name nor a mapping.
    #[error("options must be a preset name or a mapping of option lists")]
    InvalidBase,

    /// The overrides were not a mapping.
    #[error("overrides must be a mapping of option lists")]
    InvalidOverrides,

    /// An option value was not a string or an array of strings.
    #[error("the {option} option must be a string or an array of strings")]
    InvalidOptionType {
        /// Name of the offending option.
        option: String,
    },

    /// An option name is not recognized.
    #[error("unknown option '{0}'\n  hint: run 'issue-parser presets show' to list option names")]
    UnknownOption(String),

    /// The generated pattern was rejected by the regex engine.
    #[error("failed to compile matching pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors raised while scanning text.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    /// The text was empty or whitespace-only and the matcher rejects blank input.
    #[error("the issue text must not be blank")]
    Blank,

    /// The text was not valid UTF-8.
    #[error("the issue text must be valid UTF-8 (invalid byte at offset {offset})")]
    InvalidUtf8 {
        /// Byte offset of the first invalid sequence.
        offset: usize,
    },
}
