//! Parse command: scans a file or standard input.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::format::{render, text_report, OutputFormat, Report};
use super::matcher::MatcherArgs;
use crate::settings::Settings;

/// Parses a file or standard input.
#[derive(Parser)]
pub struct ParseCommand {
    /// File to parse; reads standard input when omitted or "-".
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Vocabulary selection.
    #[command(flatten)]
    pub matcher: MatcherArgs,

    /// Output format: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Fails on empty or blank input instead of reporting nothing.
    #[arg(long)]
    pub strict: bool,
}

impl ParseCommand {
    /// Executes the parse command.
    pub fn execute(self) -> Result<()> {
        let settings = Settings::load()?;
        let input = self.read_input()?;
        let report = self.run(&settings, &input)?;
        print!(
            "{}",
            render(self.format, &report, || text_report(&report.result, ""))?
        );
        Ok(())
    }

    /// Parses `input` with the matcher selected by the flags.
    pub fn run(&self, settings: &Settings, input: &[u8]) -> Result<Report> {
        let matcher = self.matcher.build(settings)?.reject_blank(self.strict);
        let result = matcher
            .parse_bytes(input)
            .with_context(|| format!("Failed to parse {}", self.source_name()))?;
        Ok(Report::from(result))
    }

    fn read_input(&self) -> Result<Vec<u8>> {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => fs::read(path)
                .with_context(|| format!("Failed to read file: {}", path.display())),
            _ => {
                let mut input = Vec::new();
                io::stdin()
                    .read_to_end(&mut input)
                    .context("Failed to read standard input")?;
                Ok(input)
            }
        }
    }

    fn source_name(&self) -> String {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => path.display().to_string(),
            _ => "standard input".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;

    fn command(strict: bool) -> ParseCommand {
        ParseCommand {
            file: None,
            matcher: MatcherArgs {
                preset: Some("github".to_string()),
                ..MatcherArgs::default()
            },
            format: OutputFormat::Json,
            strict,
        }
    }

    #[test]
    fn run_parses_input() {
        let report = command(false)
            .run(&Settings::default(), b"Resolves #10")
            .unwrap();
        assert_eq!(report.result.actions[0].issue, "10");
        assert_eq!(report.all_refs.len(), 1);
    }

    #[test]
    fn strict_rejects_blank_input() {
        let err = command(true).run(&Settings::default(), b"   ").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse standard input");
        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::Blank)
        );
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let err = command(false)
            .run(&Settings::default(), b"#1 \xc3")
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::InvalidUtf8 { offset: 3 })
        );
    }
}
