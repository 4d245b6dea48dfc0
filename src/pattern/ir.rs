//! Pattern IR.
//!
//! Patterns are assembled as a tree of [`Node`]s, simplified, and only then
//! rendered to `regex` syntax. Simplification is what turns an empty keyword
//! list into "this branch never matches" instead of an empty alternation that
//! would match everywhere.

use std::fmt::Write as _;

/// Repetition operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    /// `?`
    Optional,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
}

impl Repetition {
    const fn operator(self) -> char {
        match self {
            Self::Optional => '?',
            Self::ZeroOrMore => '*',
            Self::OneOrMore => '+',
        }
    }
}

/// A pattern node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Matches nothing.
    Never,
    /// Matches the empty string.
    Empty,
    /// A literal, escaped when rendered.
    Literal(String),
    /// A regex fragment rendered verbatim. Must be a single atom.
    Raw(&'static str),
    /// Leftmost-first alternation.
    Alt(Vec<Node>),
    /// Concatenation.
    Seq(Vec<Node>),
    /// Named capture group.
    Capture(&'static str, Box<Node>),
    /// Greedy repetition.
    Repeat(Box<Node>, Repetition),
}

impl Node {
    /// Alternation of literal keywords, in the given order.
    pub fn literals<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Alt(
            keywords
                .into_iter()
                .map(|keyword| Self::Literal(keyword.as_ref().to_string()))
                .collect(),
        )
    }

    /// Named capture of `node`.
    pub fn capture(name: &'static str, node: Self) -> Self {
        Self::Capture(name, Box::new(node))
    }

    /// `node?`
    pub fn optional(node: Self) -> Self {
        Self::Repeat(Box::new(node), Repetition::Optional)
    }

    /// `node*`
    pub fn zero_or_more(node: Self) -> Self {
        Self::Repeat(Box::new(node), Repetition::ZeroOrMore)
    }

    /// `node+`
    pub fn one_or_more(node: Self) -> Self {
        Self::Repeat(Box::new(node), Repetition::OneOrMore)
    }

    /// Removes `Never` and `Empty` nodes wherever they do not change what the
    /// pattern matches.
    #[must_use]
    pub fn simplify(self) -> Self {
        match self {
            Self::Alt(items) => {
                let mut items: Vec<Self> = items
                    .into_iter()
                    .map(Self::simplify)
                    .filter(|item| *item != Self::Never)
                    .collect();
                match items.len() {
                    0 => Self::Never,
                    1 => items.remove(0),
                    _ => Self::Alt(items),
                }
            }
            Self::Seq(items) => {
                let mut simplified = Vec::with_capacity(items.len());
                for item in items.into_iter().map(Self::simplify) {
                    match item {
                        Self::Never => return Self::Never,
                        Self::Empty => {}
                        other => simplified.push(other),
                    }
                }
                match simplified.len() {
                    0 => Self::Empty,
                    1 => simplified.remove(0),
                    _ => Self::Seq(simplified),
                }
            }
            Self::Capture(name, node) => match node.simplify() {
                Self::Never => Self::Never,
                inner => Self::Capture(name, Box::new(inner)),
            },
            Self::Repeat(node, repetition) => match (node.simplify(), repetition) {
                (Self::Never, Repetition::OneOrMore) => Self::Never,
                (Self::Never | Self::Empty, _) => Self::Empty,
                (inner, repetition) => Self::Repeat(Box::new(inner), repetition),
            },
            leaf => leaf,
        }
    }

    /// Renders the node to `regex` syntax.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Self::Never => out.push_str(r"(?:\b\B)"),
            Self::Empty => {}
            Self::Literal(text) => out.push_str(&regex::escape(text)),
            Self::Raw(fragment) => out.push_str(fragment),
            Self::Alt(items) => {
                out.push_str("(?:");
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push('|');
                    }
                    item.render_into(out);
                }
                out.push(')');
            }
            Self::Seq(items) => {
                for item in items {
                    item.render_into(out);
                }
            }
            Self::Capture(name, node) => {
                let _ = write!(out, "(?P<{name}>");
                node.render_into(out);
                out.push(')');
            }
            Self::Repeat(node, repetition) => {
                if node.is_atom() {
                    node.render_into(out);
                } else {
                    out.push_str("(?:");
                    node.render_into(out);
                    out.push(')');
                }
                out.push(repetition.operator());
            }
        }
    }

    /// True when the rendered node can take a repetition operator as-is.
    fn is_atom(&self) -> bool {
        match self {
            Self::Raw(_) | Self::Alt(_) | Self::Capture(..) | Self::Never => true,
            Self::Literal(text) => text.chars().count() == 1,
            Self::Empty | Self::Seq(_) | Self::Repeat(..) => false,
        }
    }
}
