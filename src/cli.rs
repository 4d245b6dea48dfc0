//! CLI interface for issue-parser.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commits;
pub mod format;
pub mod help;
pub mod matcher;
pub mod parse;
pub mod presets;

pub use commits::CommitsCommand;
pub use format::OutputFormat;
pub use help::{HelpCommand, HelpGenerator};
pub use matcher::MatcherArgs;
pub use parse::ParseCommand;
pub use presets::PresetsCommand;

/// issue-parser: finds issue actions, references and mentions in text.
#[derive(Parser)]
#[command(name = "issue-parser")]
#[command(
    about = "Extracts issue actions, references, duplicates and mentions from text",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parses a file or standard input.
    Parse(ParseCommand),
    /// Parses the messages of a range of git commits.
    Commits(CommitsCommand),
    /// Lists and shows the built-in presets.
    Presets(PresetsCommand),
    /// Displays help for every command.
    HelpAll(HelpCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Parse(parse_cmd) => parse_cmd.execute(),
            Commands::Commits(commits_cmd) => commits_cmd.execute(),
            Commands::Presets(presets_cmd) => presets_cmd.execute(),
            Commands::HelpAll(help_cmd) => help_cmd.execute(),
        }
    }
}
