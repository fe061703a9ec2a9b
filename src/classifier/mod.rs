//! Classification module for plan resource changes.
//!
//! This module sorts every resource change of a plan into reportable
//! categories and computes the structured diff shown for updates.

mod classify;
mod diff;
mod results;
mod tags;

pub use classify::{
    ChangeClassifier, ClassificationOutcome, ClassifiedEntry, format_detail, format_operation,
    render_value,
};
pub use diff::{DiffEngine, DiffKind, DiffOperation, pointer_to_path};
pub use results::{AggregatedEntry, Category, ResultAggregator, ResultSet};
pub use tags::{TAG_KEYS, TagDetector, is_tag_key};

use tracing::{debug, info};

use crate::error::Result;
use crate::plan::{Plan, PlanParser};

/// Runs every resource change of a plan through the classifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlanSummarizer {
    /// Change classifier.
    classifier: ChangeClassifier,
    /// Whether tag changes get their own category.
    show_tags: bool,
}

impl PlanSummarizer {
    /// Creates a new summarizer.
    #[must_use]
    pub const fn new(show_tags: bool) -> Self {
        Self {
            classifier: ChangeClassifier::new(),
            show_tags,
        }
    }

    /// Classifies a decoded plan into a fresh result set.
    ///
    /// Resources are processed in plan order, so each category lists them in
    /// the order they appear in the plan.
    #[must_use]
    pub fn summarize(&self, plan: &Plan) -> ResultSet {
        let mut aggregator = ResultAggregator::new();

        for change in &plan.resource_changes {
            let outcome = self.classifier.classify(change, self.show_tags);
            debug!(
                "Classified {} [{}] as {:?}",
                change.address,
                change.change.actions,
                outcome.categories()
            );
            outcome.apply(&mut aggregator);
        }

        info!(
            "Summarized {} resource changes into {} entries",
            plan.resource_changes.len(),
            aggregator.len()
        );
        aggregator.into_result_set()
    }

    /// Decodes raw plan bytes and classifies them.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be decoded; no partial result is
    /// produced in that case.
    pub fn summarize_bytes(&self, bytes: &[u8], location: Option<&str>) -> Result<ResultSet> {
        let plan = PlanParser::new().parse_slice(bytes, location)?;
        Ok(self.summarize(&plan))
    }
}
