//! # issue-parser
//!
//! Finds issue references, closing actions, duplicate markers, relation
//! keywords and user mentions in commit messages, pull request descriptions
//! and comments.
//!
//! A [`Matcher`] is built once from a preset (`github`, `gitlab`,
//! `bitbucket`, `default`) or from custom options, then reused for any number
//! of texts. Code blocks, inline code and HTML `<code>` elements are ignored.
//!
//! ## Quick Start
//!
//! ```rust
//! use issue_parser::{Matcher, Preset};
//!
//! let matcher = Matcher::new(Preset::GitHub).unwrap();
//! let result = matcher.parse("Fix #1, thanks @octocat").unwrap();
//!
//! assert_eq!(result.actions[0].action.as_deref(), Some("Fix"));
//! assert_eq!(result.actions[0].issue, "1");
//! assert_eq!(result.mentions[0].user, "octocat");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod git;
pub mod pattern;
pub mod scanner;
pub mod settings;

pub use crate::cli::Cli;
pub use crate::config::{Base, Config, OptionKey, Options, Preset};
pub use crate::data::{Category, Mention, ParseResult, Reference};
pub use crate::error::{ConfigError, InputError};
pub use crate::scanner::Matcher;

/// The current version of issue-parser.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
