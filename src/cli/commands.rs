//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{CONFIG_ENV_VAR, SettingsOverrides};

/// tftools - Easy CLI with useful Terraform tools.
#[derive(Parser, Debug)]
#[command(name = "tftools")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the settings file.
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a Terraform JSON plan (`terraform show -json plan.out`).
    Summarize {
        /// Plan files to summarize. Reads standard input when empty or `-`.
        paths: Vec<PathBuf>,

        /// Report tag-only changes separately and hide tag paths from diffs.
        #[arg(long)]
        show_tags: bool,

        /// Also list resources without changes.
        #[arg(long)]
        show_unchanged: bool,

        /// Drop blank lines between sections and the summary table.
        #[arg(long)]
        compact: bool,

        /// Render Markdown, e.g. for pull request comments.
        #[arg(long)]
        markdown: bool,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Commands {
    /// Returns the settings switches given on the command line.
    #[must_use]
    pub const fn overrides(&self) -> SettingsOverrides {
        match self {
            Self::Summarize {
                show_tags,
                show_unchanged,
                compact,
                markdown,
                ..
            } => SettingsOverrides {
                show_tags: *show_tags,
                show_unchanged: *show_unchanged,
                compact: *compact,
                markdown: *markdown,
            },
        }
    }
}
