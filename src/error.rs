//! Error types for tftools.
//!
//! This module provides the error hierarchy for every stage of a plan
//! summary: settings loading, plan decoding, and per-resource diffing.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tftools.
#[derive(Debug, Error)]
pub enum TftoolsError {
    /// Settings-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plan decoding errors.
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The settings file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// An environment override holds a value that is not a boolean.
    #[error("Invalid value '{value}' for {name}: expected a boolean")]
    InvalidValue {
        /// Name of the variable.
        name: String,
        /// The rejected value.
        value: String,
    },
}

/// Plan decoding errors.
///
/// These are fatal: nothing downstream can run without a decoded plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The plan file was not found.
    #[error("Plan file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The plan document is not valid JSON or does not match the plan schema.
    #[error("Failed to decode plan: {message}")]
    Decode {
        /// Description of the decode error.
        message: String,
        /// Where the plan came from (file path or `<stdin>`).
        location: Option<String>,
    },
}

/// Structural diff errors.
///
/// These stay local to one resource and are never lifted into
/// [`TftoolsError`]: the resource is still classified, without detail.
#[derive(Debug, Error)]
pub enum DiffError {
    /// One side of a comparison could not be turned into a JSON value.
    #[error("Failed to serialize {side} state: {message}")]
    Serialization {
        /// Which side failed (`before` or `after`).
        side: &'static str,
        /// Description of the serialization error.
        message: String,
    },
}

/// Result type alias for tftools operations.
pub type Result<T> = std::result::Result<T, TftoolsError>;

impl PlanError {
    /// Creates a decode error for the given source.
    #[must_use]
    pub fn decode(message: impl Into<String>, location: Option<&str>) -> Self {
        Self::Decode {
            message: message.into(),
            location: location.map(String::from),
        }
    }
}

impl DiffError {
    /// Creates a serialization error for one side of a comparison.
    #[must_use]
    pub fn serialization(side: &'static str, message: impl Into<String>) -> Self {
        Self::Serialization {
            side,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_error_message() {
        let err = DiffError::serialization("before", "key must be a string");
        assert_eq!(
            err.to_string(),
            "Failed to serialize before state: key must be a string"
        );
    }

    #[test]
    fn test_decode_error_message() {
        let err = TftoolsError::from(PlanError::decode("expected value at line 1", None));
        assert_eq!(
            err.to_string(),
            "Plan error: Failed to decode plan: expected value at line 1"
        );
    }
}
