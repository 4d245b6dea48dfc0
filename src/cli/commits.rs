//! Commits command: scans the messages of a git commit range.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use super::format::{render, text_report, OutputFormat, Report};
use super::matcher::MatcherArgs;
use crate::git::{short_hash, CommitMessage, GitRepository};
use crate::settings::Settings;

/// Parses the messages of a range of git commits.
#[derive(Parser)]
pub struct CommitsCommand {
    /// Commit range to scan, such as HEAD~3..HEAD or a single revision.
    #[arg(value_name = "COMMIT_RANGE", default_value = "HEAD")]
    pub range: String,

    /// Path to the git repository.
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub repo: PathBuf,

    /// Vocabulary selection.
    #[command(flatten)]
    pub matcher: MatcherArgs,

    /// Output format: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Leaves out commits without references or mentions.
    #[arg(long)]
    pub only_matching: bool,
}

/// References found in one commit message.
#[derive(Debug, Clone, Serialize)]
pub struct CommitReport {
    /// Full commit hash.
    pub hash: String,
    /// First line of the commit message.
    pub summary: String,
    /// What the message references.
    #[serde(flatten)]
    pub report: Report,
}

impl CommitsCommand {
    /// Executes the commits command.
    pub fn execute(self) -> Result<()> {
        let settings = Settings::load()?;
        let reports = self.run(&settings)?;
        print!(
            "{}",
            render(self.format, &reports, || text_commits(&reports))?
        );
        Ok(())
    }

    /// Scans every commit of the range, oldest first.
    pub fn run(&self, settings: &Settings) -> Result<Vec<CommitReport>> {
        let matcher = self.matcher.build(settings)?;
        let repo = GitRepository::open_at(&self.repo)?;
        let messages = repo.commit_messages_in_range(&self.range)?;

        let mut reports = Vec::with_capacity(messages.len());
        for CommitMessage {
            hash,
            summary,
            message,
        } in messages
        {
            let result = matcher
                .parse(&message)
                .with_context(|| format!("Failed to parse message of commit {hash}"))?;
            if self.only_matching && result.is_empty() {
                continue;
            }
            reports.push(CommitReport {
                hash,
                summary,
                report: Report::from(result),
            });
        }

        Ok(reports)
    }
}

/// Renders commit reports as text.
pub fn text_commits(reports: &[CommitReport]) -> String {
    if reports.is_empty() {
        return "No commits found.\n".to_string();
    }

    let mut out = String::new();
    for report in reports {
        out.push_str(&format!("{} {}\n", short_hash(&report.hash), report.summary));
        out.push_str(&text_report(&report.report.result, "  "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ParseResult;

    #[test]
    fn text_for_commits() {
        let reports = vec![CommitReport {
            hash: "0123456789abcdef".to_string(),
            summary: "Update docs".to_string(),
            report: Report::from(ParseResult::default()),
        }];
        assert_eq!(
            text_commits(&reports),
            "01234567 Update docs\n  No references found.\n"
        );
        assert_eq!(text_commits(&[]), "No commits found.\n");
    }
}
