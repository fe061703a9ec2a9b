//! Plan parser for decoding Terraform JSON plans.
//!
//! A plan that fails to decode stops the run: no partial summary is ever
//! produced from a document that is not valid JSON.

use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{PlanError, Result, TftoolsError};

use super::types::Plan;

/// Location label used for plans read from standard input.
pub const STDIN_LOCATION: &str = "<stdin>";

/// Decoder for Terraform JSON plans.
#[derive(Debug, Default)]
pub struct PlanParser;

impl PlanParser {
    /// Creates a new plan parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads and decodes a plan file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or not a valid plan.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Plan> {
        let path = path.as_ref();
        info!("Loading plan from: {}", path.display());

        if !path.exists() {
            return Err(TftoolsError::Plan(PlanError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let bytes = std::fs::read(path)?;
        self.parse_slice(&bytes, Some(&path.display().to_string()))
    }

    /// Reads a whole plan from a reader (usually standard input) and decodes it.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content is not a valid plan.
    pub fn parse_reader(&self, mut reader: impl Read, location: &str) -> Result<Plan> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.parse_slice(&bytes, Some(location))
    }

    /// Decodes a plan from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid plan.
    pub fn parse_str(&self, content: &str) -> Result<Plan> {
        self.parse_slice(content.as_bytes(), None)
    }

    /// Decodes a plan from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid plan.
    pub fn parse_slice(&self, bytes: &[u8], location: Option<&str>) -> Result<Plan> {
        debug!("Decoding plan ({} bytes)", bytes.len());

        let plan: Plan = serde_json::from_slice(bytes)
            .map_err(|e| TftoolsError::Plan(PlanError::decode(e.to_string(), location)))?;

        debug!(
            "Decoded plan with {} resource changes (terraform {})",
            plan.resource_changes.len(),
            plan.terraform_version.as_deref().unwrap_or("unknown")
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Action;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_PLAN: &str = r#"{
        "format_version": "1.2",
        "terraform_version": "1.7.5",
        "planned_values": {},
        "resource_changes": [
            {
                "address": "aws_s3_bucket.logs",
                "mode": "managed",
                "type": "aws_s3_bucket",
                "name": "logs",
                "provider_name": "registry.terraform.io/hashicorp/aws",
                "change": {
                    "actions": ["update"],
                    "before": {"bucket": "logs", "tags": {"env": "dev"}},
                    "after": {"bucket": "logs", "tags": {"env": "prod"}},
                    "after_unknown": {}
                }
            },
            {
                "address": "aws_instance.web[0]",
                "change": {
                    "actions": ["create"],
                    "before": null,
                    "after": {"ami": "ami-123"}
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample_plan() {
        let plan = PlanParser::new().parse_str(SAMPLE_PLAN).expect("valid plan");

        assert_eq!(plan.terraform_version.as_deref(), Some("1.7.5"));
        assert_eq!(plan.resource_changes.len(), 2);

        let bucket = &plan.resource_changes[0];
        assert_eq!(bucket.address, "aws_s3_bucket.logs");
        assert_eq!(bucket.resource_type.as_deref(), Some("aws_s3_bucket"));
        assert!(bucket.change.actions.contains(Action::Update));

        let instance = &plan.resource_changes[1];
        assert_eq!(instance.address, "aws_instance.web[0]");
        assert!(instance.change.before.is_null());
    }

    #[test]
    fn test_plan_without_resource_changes() {
        let plan = PlanParser::new()
            .parse_str(r#"{"format_version": "1.2"}"#)
            .expect("valid plan");
        assert!(plan.resource_changes.is_empty());
    }

    #[test]
    fn test_null_resource_changes_decode_as_empty() {
        let plan = PlanParser::new()
            .parse_str(r#"{"format_version": "1.2", "resource_changes": null}"#)
            .expect("valid plan");
        assert!(plan.resource_changes.is_empty());
    }

    #[test]
    fn test_null_actions_are_not_a_decode_error() {
        let plan = PlanParser::new()
            .parse_str(r#"{"resource_changes": [{"address": "null_resource.a", "change": {"actions": null}}]}"#)
            .expect("valid plan");
        assert!(plan.resource_changes[0].change.actions.is_empty());
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let result = PlanParser::new().parse_slice(b"{not json", Some(STDIN_LOCATION));
        match result {
            Err(TftoolsError::Plan(PlanError::Decode { location, .. })) => {
                assert_eq!(location.as_deref(), Some(STDIN_LOCATION));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(SAMPLE_PLAN.as_bytes())
            .expect("Failed to write plan");

        let plan = PlanParser::new().load_file(file.path()).expect("valid plan");
        assert_eq!(plan.resource_changes.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = PlanParser::new().load_file("/nonexistent/plan.json");
        assert!(matches!(
            result,
            Err(TftoolsError::Plan(PlanError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_parse_reader() {
        let plan = PlanParser::new()
            .parse_reader(SAMPLE_PLAN.as_bytes(), STDIN_LOCATION)
            .expect("valid plan");
        assert_eq!(plan.resource_changes.len(), 2);
    }
}
