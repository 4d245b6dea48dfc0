//! Scan results.

use serde::{Deserialize, Serialize};

use crate::config::OptionKey;

/// Action category a keyword belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Closing actions (`Fix #1`).
    Action,
    /// The referenced issue is blocked by this one.
    Blocks,
    /// The referenced issue is required by this one.
    Requires,
    /// This item is the parent of the referenced issue.
    ParentOf,
    /// This item is a child of the referenced issue.
    ChildOf,
    /// This item duplicates the referenced issue.
    Duplicate,
}

impl Category {
    /// Order in which a keyword is looked up when it belongs to several lists.
    pub const PRIORITY: [Self; 6] = [
        Self::Action,
        Self::Blocks,
        Self::Requires,
        Self::ParentOf,
        Self::ChildOf,
        Self::Duplicate,
    ];

    /// Returns the option holding this category's keywords.
    pub const fn option_key(self) -> OptionKey {
        match self {
            Self::Action => OptionKey::ReferenceActions,
            Self::Blocks => OptionKey::BlocksActions,
            Self::Requires => OptionKey::RequiresActions,
            Self::ParentOf => OptionKey::ParentOfActions,
            Self::ChildOf => OptionKey::ChildOfActions,
            Self::Duplicate => OptionKey::DuplicateActions,
        }
    }
}

/// An issue reference, with or without a preceding action keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Matched text, starting at the action keyword, URL, slug or prefix.
    pub raw: String,
    /// Capitalized action keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// `owner/repo` path of a cross-repository reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Configured prefix that introduced the number; absent for URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Issue number.
    pub issue: String,
}

/// A user mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Matched text.
    pub raw: String,
    /// Configured prefix that introduced the handle.
    pub prefix: String,
    /// User handle.
    pub user: String,
}

/// References and mentions found in one text, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Closing actions.
    pub actions: Vec<Reference>,
    /// Plain references without an action keyword.
    pub refs: Vec<Reference>,
    /// Duplicate markers.
    pub duplicates: Vec<Reference>,
    /// "Blocks" relations.
    pub blocks: Vec<Reference>,
    /// "Requires" relations.
    pub requires: Vec<Reference>,
    /// "Parent of" relations.
    pub parent_of: Vec<Reference>,
    /// "Child of" relations.
    pub child_of: Vec<Reference>,
    /// User mentions.
    pub mentions: Vec<Mention>,
}

impl ParseResult {
    /// Returns the bucket of an action category.
    pub fn category(&self, category: Category) -> &[Reference] {
        match category {
            Category::Action => &self.actions,
            Category::Blocks => &self.blocks,
            Category::Requires => &self.requires,
            Category::ParentOf => &self.parent_of,
            Category::ChildOf => &self.child_of,
            Category::Duplicate => &self.duplicates,
        }
    }

    pub(crate) fn category_mut(&mut self, category: Category) -> &mut Vec<Reference> {
        match category {
            Category::Action => &mut self.actions,
            Category::Blocks => &mut self.blocks,
            Category::Requires => &mut self.requires,
            Category::ParentOf => &mut self.parent_of,
            Category::ChildOf => &mut self.child_of,
            Category::Duplicate => &mut self.duplicates,
        }
    }

    /// Returns every reference: actions, plain references, duplicates, then
    /// blocks, requires, parent-of and child-of relations.
    pub fn all_refs(&self) -> Vec<&Reference> {
        [
            &self.actions,
            &self.refs,
            &self.duplicates,
            &self.blocks,
            &self.requires,
            &self.parent_of,
            &self.child_of,
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Returns true when nothing was found.
    pub fn is_empty(&self) -> bool {
        self.all_refs().is_empty() && self.mentions.is_empty()
    }
}
