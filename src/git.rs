//! Git operations.

use git2::Commit;
use serde::Serialize;

pub mod repository;

pub use repository::GitRepository;

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;

/// A commit message read from the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitMessage {
    /// Full commit hash.
    pub hash: String,
    /// First line of the message.
    pub summary: String,
    /// Full message.
    pub message: String,
}

impl CommitMessage {
    /// Reads the message of a git commit. Non-UTF-8 bytes are replaced.
    pub fn from_git_commit(commit: &Commit<'_>) -> Self {
        let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
        let summary = message.lines().next().unwrap_or_default().to_string();

        Self {
            hash: commit.id().to_string(),
            summary,
            message,
        }
    }
}

/// Abbreviates a commit hash.
pub fn short_hash(hash: &str) -> &str {
    &hash[..SHORT_HASH_LEN.min(hash.len())]
}
