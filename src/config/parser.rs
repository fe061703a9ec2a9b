//! Settings parser for loading `.tftools.yaml`.
//!
//! This module handles loading settings from YAML files and environment
//! variables, with proper precedence and error handling.

use crate::error::{ConfigError, Result, TftoolsError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::spec::Settings;

/// Settings file names searched for in the working directory and its parents.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[".tftools.yaml", ".tftools.yml"];

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV_VAR: &str = "TFTOOLS_CONFIG";

/// Settings parser for loading summarize options.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving the `.env` file.
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new settings parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving the `.env` file.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Settings> {
        let path = path.as_ref();
        info!("Loading settings from: {}", path.display());

        if !path.exists() {
            return Err(TftoolsError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            TftoolsError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses settings from a YAML string.
    ///
    /// An empty document yields the default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<Settings> {
        debug!("Parsing YAML settings");

        if content.trim().is_empty() {
            return Ok(Settings::default());
        }

        let settings: Settings = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            TftoolsError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })?;

        Ok(settings)
    }

    /// Resolves and loads settings, then applies environment overrides.
    ///
    /// Resolution order: the explicit path, a settings file found from the
    /// working directory upwards, the user-level settings file, defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but is invalid, if an
    /// explicit path is missing, or if an override is not a boolean.
    pub fn load(&self, explicit: Option<&Path>) -> Result<Settings> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir()
                .ok()
                .and_then(|dir| find_config_file(&dir))
                .or_else(user_config_file),
        };

        let mut settings = match path {
            Some(path) => self.load_file(path)?,
            None => {
                debug!("No settings file found, using defaults");
                Settings::default()
            }
        };

        Self::apply_env_overrides(&mut settings, |name| std::env::var(name).ok())?;
        Ok(settings)
    }

    /// Applies environment variable overrides to the settings.
    ///
    /// Variables are named `TFTOOLS_<OPTION>` (e.g. `TFTOOLS_SHOW_TAGS`).
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds something other than a boolean.
    pub fn apply_env_overrides(
        settings: &mut Settings,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        let options: [(&str, &mut bool); 4] = [
            ("TFTOOLS_SHOW_TAGS", &mut settings.show_tags),
            ("TFTOOLS_SHOW_UNCHANGED", &mut settings.show_unchanged),
            ("TFTOOLS_COMPACT", &mut settings.compact),
            ("TFTOOLS_MARKDOWN", &mut settings.markdown),
        ];

        for (name, option) in options {
            if let Some(value) = lookup(name) {
                debug!("Overriding {name} from environment");
                *option = parse_bool(name, &value)?;
            }
        }

        Ok(())
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                TftoolsError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

/// Parses a boolean environment value.
fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(TftoolsError::Config(ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        })),
    }
}

/// Finds a settings file in the given directory or its parents.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let mut current = start_dir.as_ref().to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found settings file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Returns the user-level settings file if it exists.
fn user_config_file() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("tftools").join("config.yaml");
    path.exists().then_some(path)
}
