//! Command-line argument parsing
//!
//! Supports:
//! - Reading the default table from a file or stdin
//! - Writing the result to a file or stdout
//! - An extra rule layer and output format override
//! - Printing the effective rules or pipeline statistics

use clap::Parser;
use std::path::PathBuf;

use crate::config::RemapConfig;
use crate::keymap::OutputFormat;

/// Derive a remapped keybinding table from a default one
#[derive(Parser, Debug)]
#[command(name = "keyremap", version, about = "Remap a default keybinding table")]
pub struct CliArgs {
    /// Default keybindings JSON (`-` for stdin)
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Extra rule layer applied on top of the defaults and user rules
    #[arg(short = 'r', long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Output document format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Drop bindings with unknown keys instead of failing
    #[arg(long)]
    pub skip_unknown: bool,

    /// Print the effective rule set as YAML and exit
    #[arg(long)]
    pub print_rules: bool,

    /// Print per-stage counts to stderr
    #[arg(long)]
    pub stats: bool,
}

/// Where the default table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

/// What the run should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Remap the input table
    Remap { input: InputSource, output: Option<PathBuf> },
    /// Only print the layered rules
    PrintRules,
}

/// Configuration derived from CLI arguments and the config file
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: RunMode,
    pub rules: Option<PathBuf>,
    pub format: OutputFormat,
    pub skip_unknown_keys: bool,
    pub show_stats: bool,
}

impl CliArgs {
    /// Merge parsed CLI args over the config file
    pub fn into_config(self, config: RemapConfig) -> Result<RunConfig, String> {
        if self.print_rules && self.output.is_some() {
            return Err("--print-rules cannot be combined with --output".to_string());
        }
        if self.print_rules && self.input.as_os_str() != "-" {
            return Err(format!(
                "--print-rules does not read an input table (got {})",
                self.input.display()
            ));
        }

        let mode = if self.print_rules {
            RunMode::PrintRules
        } else {
            let input = if self.input.as_os_str() == "-" {
                InputSource::Stdin
            } else {
                InputSource::File(self.input)
            };
            RunMode::Remap {
                input,
                output: self.output,
            }
        };

        Ok(RunConfig {
            mode,
            rules: self.rules.or(config.rules),
            format: self.format.unwrap_or(config.format),
            skip_unknown_keys: self.skip_unknown || config.skip_unknown_keys,
            show_stats: self.stats,
        })
    }
}
