//! Output formats and report rendering.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::{Mention, ParseResult, Reference};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(format!(
                "unknown format '{other}' (expected text, json or yaml)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// A parse result together with its flattened reference list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Per-category results.
    #[serde(flatten)]
    pub result: ParseResult,
    /// Every reference, in [`ParseResult::all_refs`] order.
    pub all_refs: Vec<Reference>,
}

impl From<ParseResult> for Report {
    fn from(result: ParseResult) -> Self {
        let all_refs = result.all_refs().into_iter().cloned().collect();
        Self { result, all_refs }
    }
}

/// Renders `value` in `format`; `text` produces the text rendering.
pub fn render<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text()),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to serialize to YAML"),
    }
}

fn reference_line(reference: &Reference) -> String {
    match &reference.slug {
        Some(slug) => format!("{}  [{slug} #{}]", reference.raw, reference.issue),
        None => format!("{}  [#{}]", reference.raw, reference.issue),
    }
}

fn mention_line(mention: &Mention) -> String {
    format!("{}  [{}]", mention.raw, mention.user)
}

/// Renders a parse result as indented text sections.
pub fn text_report(result: &ParseResult, indent: &str) -> String {
    if result.is_empty() {
        return format!("{indent}No references found.\n");
    }

    let sections: [(&str, &[Reference]); 7] = [
        ("Actions", &result.actions),
        ("References", &result.refs),
        ("Duplicates", &result.duplicates),
        ("Blocks", &result.blocks),
        ("Requires", &result.requires),
        ("Parent of", &result.parent_of),
        ("Child of", &result.child_of),
    ];

    let mut out = String::new();
    for (title, references) in sections {
        if references.is_empty() {
            continue;
        }
        out.push_str(&format!("{indent}{title}:\n"));
        for reference in references {
            out.push_str(&format!("{indent}  {}\n", reference_line(reference)));
        }
    }

    if !result.mentions.is_empty() {
        out.push_str(&format!("{indent}Mentions:\n"));
        for mention in &result.mentions {
            out.push_str(&format!("{indent}  {}\n", mention_line(mention)));
        }
    }

    out
}
