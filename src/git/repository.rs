//! Git repository operations

use anyhow::{Context, Result};
use git2::{Oid, Repository};

use crate::git::CommitMessage;

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open repository at specified path
    pub fn open_at<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path).context("Failed to open git repository")?;

        Ok(Self { repo })
    }

    /// Returns the messages of the commits in `range`, oldest first.
    ///
    /// `range` is `HEAD`, a single revision, or `A..B` (commits reachable from
    /// `B` but not from `A`). Merge commits are skipped in ranges.
    pub fn commit_messages_in_range(&self, range: &str) -> Result<Vec<CommitMessage>> {
        let Some((start_spec, end_spec)) = range.split_once("..") else {
            let oid = self.resolve(range)?;
            let commit = self.repo.find_commit(oid).context("Failed to find commit")?;
            return Ok(vec![CommitMessage::from_git_commit(&commit)]);
        };

        if end_spec.contains("..") {
            anyhow::bail!("Invalid range format: {}", range);
        }

        let start = self
            .resolve(start_spec)
            .with_context(|| format!("Failed to parse start commit: {}", start_spec))?;
        let end = self
            .resolve(end_spec)
            .with_context(|| format!("Failed to parse end commit: {}", end_spec))?;

        // Walk from end back to start (exclusive)
        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker.push(end).context("Failed to push end commit")?;
        walker.hide(start).context("Failed to hide start commit")?;

        let mut messages = Vec::new();
        for oid in walker {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let commit = self.repo.find_commit(oid).context("Failed to find commit")?;

            if commit.parent_count() > 1 {
                continue;
            }

            messages.push(CommitMessage::from_git_commit(&commit));
        }

        // Oldest first
        messages.reverse();
        tracing::debug!(range, count = messages.len(), "Read commit messages");

        Ok(messages)
    }

    fn resolve(&self, spec: &str) -> Result<Oid> {
        let spec = if spec.is_empty() { "HEAD" } else { spec };
        let commit = self
            .repo
            .revparse_single(spec)
            .with_context(|| format!("Failed to parse commit: {}", spec))?
            .peel_to_commit()
            .context("Failed to peel object to commit")?;
        Ok(commit.id())
    }
}
