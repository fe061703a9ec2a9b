// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![forbid(unsafe_code)]               // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # tftools
//!
//! Summarize Terraform plans for review before they are applied.
//!
//! ## Overview
//!
//! tftools reads the JSON form of a plan (`terraform show -json plan.out`)
//! and sorts every resource change into a category a reviewer cares about:
//!
//! - **create**, **update**, **delete** and **no-op**, following the plan's actions
//! - **tag**, for updates that only touch `tags`/`tags_all` (opt-in)
//!
//! Updates carry a structured diff of their attributes, with tag paths
//! filtered out so the interesting changes stand out.
//!
//! ## Modules
//!
//! - [`plan`]: Plan document types and decoding
//! - [`classifier`]: Structural diff, tag detection, classification and aggregation
//! - [`config`]: Settings file and environment overrides
//! - [`cli`]: Command-line interface and output rendering
//!
//! ## Example
//!
//! ```no_run
//! use tftools::{PlanParser, PlanSummarizer, Category};
//!
//! # fn main() -> tftools::Result<()> {
//! let plan = PlanParser::new().load_file("plan.json")?;
//! let results = PlanSummarizer::new(true).summarize(&plan);
//!
//! for entry in results.entries(Category::Update) {
//!     println!("{entry}");
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod plan;

// ============================================================================
// Re-exports
// ============================================================================

pub use classifier::{
    AggregatedEntry, Category, ChangeClassifier, DiffEngine, DiffOperation, PlanSummarizer,
    ResultAggregator, ResultSet, TagDetector,
};
pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ConfigParser, Settings};
pub use error::{Result, TftoolsError};
pub use plan::{Action, ActionSet, Plan, PlanParser, ResourceChange};
