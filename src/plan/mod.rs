//! Plan module for Terraform JSON plans.
//!
//! This module models the subset of the `terraform show -json` output that
//! the classifier consumes, and decodes raw plan bytes into it.

mod parser;
mod types;

pub use parser::{PlanParser, STDIN_LOCATION};
pub use types::{Action, ActionSet, Change, Plan, ResourceChange};
