//! Help for every command in one document.

use anyhow::Result;
use clap::{Command, CommandFactory, Parser};

/// Displays help for every command.
#[derive(Parser)]
pub struct HelpCommand {}

/// Renders the help of the whole command tree.
pub struct HelpGenerator {
    app: Command,
}

impl HelpGenerator {
    /// Creates a generator for the `issue-parser` command tree.
    pub fn new() -> Self {
        Self {
            app: super::Cli::command(),
        }
    }

    /// Renders the main help followed by the help of every subcommand.
    ///
    /// Subcommands are sorted by name at each level so the output is stable.
    pub fn generate_all_help(&self) -> Result<String> {
        let mut sections = vec![render_command_help(&self.app, "")];
        collect_help_recursive(&self.app, "", &mut sections);

        let separator = format!("\n\n{}\n\n", "=".repeat(80));
        Ok(sections.join(&separator))
    }
}

impl Default for HelpGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_help_recursive(cmd: &Command, prefix: &str, sections: &mut Vec<String>) {
    let mut subcommands: Vec<_> = cmd.get_subcommands().collect();
    subcommands.sort_by(|a, b| a.get_name().cmp(b.get_name()));

    for subcmd in subcommands {
        if subcmd.get_name() == "help" {
            continue;
        }

        let path = if prefix.is_empty() {
            subcmd.get_name().to_string()
        } else {
            format!("{prefix} {}", subcmd.get_name())
        };

        sections.push(render_command_help(subcmd, &path));
        collect_help_recursive(subcmd, &path, sections);
    }
}

fn render_command_help(cmd: &Command, path: &str) -> String {
    let name = if path.is_empty() {
        cmd.get_name().to_string()
    } else {
        format!("issue-parser {path}")
    };
    let about = cmd
        .get_about()
        .map_or_else(|| "No description available".to_string(), ToString::to_string);
    let help = cmd.clone().render_help().to_string();

    format!("{name} - {about}\n\n{}", help.trim_end())
}

impl HelpCommand {
    /// Executes the help-all command.
    pub fn execute(self) -> Result<()> {
        let help_output = HelpGenerator::new().generate_all_help()?;
        println!("{help_output}");
        Ok(())
    }
}
