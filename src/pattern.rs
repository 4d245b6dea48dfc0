//! Pattern compilation.
//!
//! The main pattern has two branches, tried in order at every position:
//!
//! - a reference: optional action keyword, then an issue prefix or a host URL
//!   with an optional `owner/repo` slug, then the issue number;
//! - a mention run: one or more adjacent `<prefix><handle>` tokens.
//!
//! A second pattern splits a mention run into single mentions.

use regex::{Regex, RegexBuilder};

use crate::config::Config;
use crate::error::ConfigError;

pub mod ir;

use ir::Node;

/// Group names used by the compiled patterns.
pub mod groups {
    /// Action keyword.
    pub const ACTION: &str = "action";
    /// `owner/repo` slug.
    pub const SLUG: &str = "slug";
    /// Issue prefix or URL segment.
    pub const PREFIX: &str = "prefix";
    /// Issue number.
    pub const ISSUE: &str = "issue";
    /// Run of adjacent mentions.
    pub const MENTIONS: &str = "mentions";
    /// Mention handle.
    pub const USER: &str = "user";
}

/// A character that separates tokens: not a word character and not a line break.
const SEPARATOR: &str = r"[^\w\n\v\r]";
/// Slug path component.
const SLUG_PART: &str = r"[\w.-]+";
/// Mention handle; always ends with a word character.
const HANDLE: &str = r"[\w.-]*\w";
/// Issue number. The trailing word boundary rejects `#3a`.
const ISSUE_NUMBER: &str = "[0-9]+";

/// Compiled main and mention patterns.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    main: Option<Regex>,
    mention: Option<Regex>,
}

impl CompiledPatterns {
    /// Pattern matching references and mention runs; `None` when the
    /// configuration can never match anything.
    pub fn main(&self) -> Option<&Regex> {
        self.main.as_ref()
    }

    /// Pattern matching a single mention; `None` without mention prefixes.
    pub fn mention(&self) -> Option<&Regex> {
        self.mention.as_ref()
    }
}

/// Compiles the patterns for a resolved configuration.
pub fn compile(config: &Config) -> Result<CompiledPatterns, ConfigError> {
    let main = Node::Alt(vec![reference_node(config), mention_run_node(config)]).simplify();
    let mention = mention_node(config).simplify();

    let patterns = CompiledPatterns {
        main: build(&main)?,
        mention: build(&mention)?,
    };

    tracing::debug!(
        main = patterns.main.as_ref().map_or("<never>", Regex::as_str),
        mention = patterns.mention.as_ref().map_or("<never>", Regex::as_str),
        "Compiled patterns"
    );

    Ok(patterns)
}

fn build(node: &Node) -> Result<Option<Regex>, ConfigError> {
    if *node == Node::Never {
        return Ok(None);
    }

    let regex = RegexBuilder::new(&node.render())
        .case_insensitive(true)
        .multi_line(true)
        .crlf(true)
        .build()?;
    Ok(Some(regex))
}

/// A separator character or the start of a line.
fn boundary() -> Node {
    Node::Alt(vec![Node::Raw(SEPARATOR), Node::Raw("^")])
}

/// Builds the reference branch.
pub fn reference_node(config: &Config) -> Node {
    let prefixes = Node::literals(&config.issue_prefixes);
    let url_prefix = Node::Seq(vec![
        Node::Literal("/".to_string()),
        Node::literals(&config.issue_url_segments),
        Node::Literal("/".to_string()),
    ]);

    Node::Seq(vec![
        Node::optional(Node::Seq(vec![
            Node::one_or_more(boundary()),
            Node::capture(groups::ACTION, Node::literals(config.all_actions())),
        ])),
        Node::one_or_more(Node::Alt(vec![
            Node::Raw(SEPARATOR),
            Node::Raw("^"),
            prefixes.clone(),
        ])),
        Node::optional(Node::literals(&config.hosts)),
        Node::optional(Node::capture(
            groups::SLUG,
            Node::Seq(vec![
                Node::one_or_more(Node::Seq(vec![
                    Node::Raw(SLUG_PART),
                    Node::Literal("/".to_string()),
                ])),
                Node::Raw(SLUG_PART),
            ]),
        )),
        Node::capture(groups::PREFIX, Node::Alt(vec![prefixes, url_prefix])),
        Node::capture(groups::ISSUE, Node::Raw(ISSUE_NUMBER)),
        Node::Raw(r"\b"),
    ])
}

/// Builds the mention run branch. The first mention must follow a boundary;
/// later ones may follow it directly.
pub fn mention_run_node(config: &Config) -> Node {
    let single = Node::Seq(vec![
        Node::literals(&config.mentions_prefixes),
        Node::Raw(HANDLE),
    ]);

    Node::Seq(vec![
        Node::one_or_more(boundary()),
        Node::capture(
            groups::MENTIONS,
            Node::Seq(vec![
                single.clone(),
                Node::zero_or_more(Node::Seq(vec![Node::Raw(r"[^\w\n\v\r]*"), single])),
            ]),
        ),
    ])
}

/// Builds the single mention pattern used to split a run.
pub fn mention_node(config: &Config) -> Node {
    Node::Seq(vec![
        Node::capture(groups::PREFIX, Node::literals(&config.mentions_prefixes)),
        Node::capture(groups::USER, Node::Raw(HANDLE)),
    ])
}
