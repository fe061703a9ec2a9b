//! Configuration module for tftools.
//!
//! This module handles all settings-related functionality:
//! - Parsing and deserializing `.tftools.yaml`
//! - Environment variable overrides
//! - Layering command-line switches on top

mod parser;
mod spec;

pub use parser::{CONFIG_ENV_VAR, ConfigParser, DEFAULT_CONFIG_FILES, find_config_file};
pub use spec::{Settings, SettingsOverrides};
