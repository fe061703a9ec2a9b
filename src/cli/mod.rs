//! CLI module for tftools.
//!
//! This module provides the command-line interface for summarizing
//! Terraform plans.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;
