//! Presets command: lists and shows the built-in vocabularies.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::format::{render, OutputFormat};
use crate::config::{Config, Preset, PRESETS_YAML};

/// Lists and shows the built-in presets.
#[derive(Parser)]
pub struct PresetsCommand {
    /// Presets subcommand to execute.
    #[command(subcommand)]
    pub command: PresetsSubcommands,
}

/// Presets subcommands.
#[derive(Subcommand)]
pub enum PresetsSubcommands {
    /// Lists the preset names.
    List(ListCommand),
    /// Shows a resolved preset, or the embedded presets.yaml.
    Show(ShowCommand),
}

/// Lists the preset names.
#[derive(Parser)]
pub struct ListCommand {}

/// Shows a resolved preset, or the embedded presets.yaml.
#[derive(Parser)]
pub struct ShowCommand {
    /// Preset to resolve; shows every preset when omitted.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Output format: yaml (default) or json; text is shown as yaml.
    #[arg(long, default_value = "yaml")]
    pub format: OutputFormat,
}

impl PresetsCommand {
    /// Executes the presets command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            PresetsSubcommands::List(list_cmd) => list_cmd.execute(),
            PresetsSubcommands::Show(show_cmd) => show_cmd.execute(),
        }
    }
}

impl ListCommand {
    /// Executes the list command.
    pub fn execute(self) -> Result<()> {
        print!("{}", list_text());
        Ok(())
    }
}

fn list_text() -> String {
    Preset::ALL
        .iter()
        .map(|preset| format!("{preset}\n"))
        .collect()
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        print!("{}", self.output()?);
        Ok(())
    }

    fn output(&self) -> Result<String> {
        // Presets have no text rendering of their own.
        let format = match self.format {
            OutputFormat::Text => OutputFormat::Yaml,
            other => other,
        };

        match &self.name {
            Some(name) => {
                let preset: Preset = name.parse()?;
                let config = Config::resolve(preset.into(), None);
                render(format, &config, String::new)
            }
            None if format == OutputFormat::Json => {
                let all: BTreeMap<String, Config> = Preset::ALL
                    .iter()
                    .map(|&preset| (preset.to_string(), Config::resolve(preset.into(), None)))
                    .collect();
                render(format, &all, String::new)
            }
            None => Ok(PRESETS_YAML.to_string()),
        }
    }
}
