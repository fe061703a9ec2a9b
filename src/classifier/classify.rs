//! Per-resource change classification.
//!
//! Decides which categories a resource change is reported under and renders
//! the tag-filtered diff shown next to updates.

use serde_json::Value;
use tracing::{debug, warn};

use crate::plan::{Action, ResourceChange};

use super::diff::{DiffEngine, DiffKind, DiffOperation};
use super::results::{Category, ResultAggregator};
use super::tags::{TagDetector, is_tag_key};

/// Path prefix of diff operations hidden from update details.
///
/// This also covers `tags_all`.
const TAG_PATH_PREFIX: &str = "tags";

/// Classifier for individual resource changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChangeClassifier {
    /// Diff engine.
    diff_engine: DiffEngine,
    /// Tag detector.
    tag_detector: TagDetector,
}

/// A single write to the result aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEntry {
    /// Category to record under.
    pub category: Category,
    /// Resource address.
    pub address: String,
    /// Rendered diff, if any.
    pub detail: Option<String>,
}

/// Every entry produced for one resource change, in recording order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationOutcome {
    /// Entries to record.
    pub entries: Vec<ClassifiedEntry>,
}

impl ChangeClassifier {
    /// Creates a new classifier.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            diff_engine: DiffEngine::new(),
            tag_detector: TagDetector::new(),
        }
    }

    /// Classifies a single resource change.
    ///
    /// Never fails: a snapshot that cannot be serialized only costs the
    /// resource its tag signal or its detail.
    #[must_use]
    pub fn classify(&self, change: &ResourceChange, show_tags: bool) -> ClassificationOutcome {
        let address = change.address.as_str();
        let actions = &change.change.actions;
        let mut outcome = ClassificationOutcome::default();

        if !actions.contains(Action::Update) {
            for action in actions.iter() {
                match Category::for_action(action) {
                    Some(category) => outcome.push(category, address, None),
                    None => debug!("Not reporting {action} action for {address}"),
                }
            }
            return outcome;
        }

        let before = &change.change.before;
        let after = &change.change.after;

        if show_tags && self.tag_only(address, before, after) {
            debug!("{address} only changes tags");
            outcome.push(Category::Tag, address, None);
            return outcome;
        }

        if show_tags && self.tag_changed(address, before, after) {
            debug!("{address} changes tags alongside other attributes");
            outcome.push(Category::Tag, address, None);
        }

        let detail = self.detail(address, before, after);
        outcome.push(Category::Update, address, detail);
        outcome
    }

    fn tag_only(&self, address: &str, before: &Value, after: &Value) -> bool {
        self.tag_detector
            .is_tag_only_change(before, after)
            .unwrap_or_else(|e| {
                warn!("Could not check tag-only change for {address}: {e}");
                false
            })
    }

    fn tag_changed(&self, address: &str, before: &Value, after: &Value) -> bool {
        self.tag_detector
            .has_tag_change(before, after)
            .unwrap_or_else(|e| {
                warn!("Could not check tag change for {address}: {e}");
                false
            })
    }

    fn detail(&self, address: &str, before: &Value, after: &Value) -> Option<String> {
        let ops = match self.diff_engine.diff(before, after) {
            Ok(ops) => ops,
            Err(e) => {
                warn!("Could not diff {address}: {e}");
                return None;
            }
        };

        let detail = format_detail(&ops);
        (!detail.is_empty()).then_some(detail)
    }
}

impl ClassificationOutcome {
    fn push(&mut self, category: Category, address: &str, detail: Option<String>) {
        self.entries.push(ClassifiedEntry {
            category,
            address: address.to_string(),
            detail,
        });
    }

    /// Records every entry into the aggregator.
    pub fn apply(self, aggregator: &mut ResultAggregator) {
        for entry in self.entries {
            aggregator.record(entry.category, &entry.address, entry.detail);
        }
    }

    /// Returns the categories in recording order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.entries.iter().map(|e| e.category).collect()
    }
}

/// Renders diff operations as detail lines, skipping tag paths.
///
/// A root-level operation carries whole snapshots; their tag keys are
/// dropped before rendering. Lines keep the order produced by the diff
/// engine and are joined by `\n`.
#[must_use]
pub fn format_detail(ops: &[DiffOperation]) -> String {
    ops.iter()
        .filter(|op| !op.path_starts_with(TAG_PATH_PREFIX))
        .map(|op| {
            if op.path.is_empty() {
                format_operation(&without_root_tags(op))
            } else {
                format_operation(op)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Copies a root-level operation with top-level tag keys removed from its values.
fn without_root_tags(op: &DiffOperation) -> DiffOperation {
    let strip = |value: &Option<Value>| {
        value.as_ref().map(|v| match v {
            Value::Object(map) => Value::Object(
                map.iter()
                    .filter(|(key, _)| !is_tag_key(key))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ),
            other => other.clone(),
        })
    };

    DiffOperation {
        old_value: strip(&op.old_value),
        new_value: strip(&op.new_value),
        ..op.clone()
    }
}

/// Renders a single diff operation as one detail line.
#[must_use]
pub fn format_operation(op: &DiffOperation) -> String {
    match op.kind {
        DiffKind::Add => format!("+ {}: {}", op.path, render_value(op.new_value.as_ref())),
        DiffKind::Remove => format!("- {}", op.path),
        DiffKind::Replace => format!(
            "~ {}: {} -> {}",
            op.path,
            render_value(op.old_value.as_ref()),
            render_value(op.new_value.as_ref())
        ),
    }
}

/// Renders a value the way a reader expects to see it in a diff line.
///
/// Strings appear without quotes, objects and arrays as compact JSON.
#[must_use]
pub fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::from("null"),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ActionSet;
    use serde_json::json;

    fn change(actions: &[Action], before: Value, after: Value) -> ResourceChange {
        ResourceChange::new(
            "aws_instance.web",
            actions.iter().copied().collect::<ActionSet>(),
            before,
            after,
        )
    }

    #[test]
    fn test_tag_only_update_goes_to_tag_only() {
        let classifier = ChangeClassifier::new();
        let rc = change(
            &[Action::Update],
            json!({"name": "a", "tags": {"env": "dev"}}),
            json!({"name": "a", "tags": {"env": "prod"}}),
        );

        let outcome = classifier.classify(&rc, true);
        assert_eq!(outcome.categories(), vec![Category::Tag]);
        assert_eq!(outcome.entries[0].detail, None);
    }

    #[test]
    fn test_tag_only_update_without_show_tags() {
        let classifier = ChangeClassifier::new();
        let rc = change(
            &[Action::Update],
            json!({"name": "a", "tags": {"env": "dev"}}),
            json!({"name": "a", "tags": {"env": "prod"}}),
        );

        let outcome = classifier.classify(&rc, false);
        assert_eq!(outcome.categories(), vec![Category::Update]);
        // Only tag paths changed, so nothing is left to show
        assert_eq!(outcome.entries[0].detail, None);
    }

    #[test]
    fn test_tag_and_other_update() {
        let classifier = ChangeClassifier::new();
        let rc = change(
            &[Action::Update],
            json!({"name": "a", "size": 1, "tags": {"env": "dev"}}),
            json!({"name": "b", "size": 1, "tags": {"env": "prod"}}),
        );

        let outcome = classifier.classify(&rc, true);
        assert_eq!(outcome.categories(), vec![Category::Tag, Category::Update]);

        let detail = outcome.entries[1].detail.as_deref().expect("update detail");
        assert!(detail.contains("~ name: a -> b"));
        assert!(!detail.contains("tags"));
    }

    #[test]
    fn test_update_detail_lines() {
        let classifier = ChangeClassifier::new();
        let rc = change(
            &[Action::Update],
            json!({"ami": "ami-1", "count": 1, "old": true, "tags_all": {"a": "b"}}),
            json!({"ami": "ami-2", "count": 1, "new": {"x": [1, 2]}, "tags_all": {"a": "c"}}),
        );

        let outcome = classifier.classify(&rc, false);
        assert_eq!(
            outcome.entries[0].detail.as_deref(),
            Some("~ ami: ami-1 -> ami-2\n+ new: {\"x\":[1,2]}\n- old")
        );
    }

    #[test]
    fn test_identical_update_has_no_detail() {
        let classifier = ChangeClassifier::new();
        let rc = change(&[Action::Update], json!({"name": "a"}), json!({"name": "a"}));

        let outcome = classifier.classify(&rc, true);
        assert_eq!(outcome.categories(), vec![Category::Update]);
        assert_eq!(outcome.entries[0].detail, None);
    }

    #[test]
    fn test_create_delete_noop() {
        let classifier = ChangeClassifier::new();

        let created = classifier.classify(&change(&[Action::Create], Value::Null, json!({"name": "a"})), true);
        assert_eq!(created.categories(), vec![Category::Create]);

        let deleted = classifier.classify(&change(&[Action::Delete], json!({"name": "a"}), Value::Null), true);
        assert_eq!(deleted.categories(), vec![Category::Delete]);

        let unchanged = classifier.classify(&change(&[Action::NoOp], json!({"name": "a"}), json!({"name": "a"})), true);
        assert_eq!(unchanged.categories(), vec![Category::NoOp]);
    }

    #[test]
    fn test_replacement_reports_both_actions() {
        let classifier = ChangeClassifier::new();
        let rc = change(
            &[Action::Delete, Action::Create],
            json!({"name": "a"}),
            json!({"name": "b"}),
        );

        let outcome = classifier.classify(&rc, true);
        assert_eq!(outcome.categories(), vec![Category::Delete, Category::Create]);
        assert!(outcome.entries.iter().all(|e| e.detail.is_none()));
    }

    #[test]
    fn test_read_is_not_reported() {
        let classifier = ChangeClassifier::new();
        let rc = change(&[Action::Read], Value::Null, json!({"id": "x"}));

        assert!(classifier.classify(&rc, true).entries.is_empty());
    }

    #[test]
    fn test_format_detail_skips_tag_paths() {
        let ops = DiffEngine::new().diff_values(
            &json!({"tags": {"a": "1"}, "tags_all": {"a": "1"}, "zone": "a"}),
            &json!({"tags": {"a": "2"}, "tags_all": {"a": "2"}, "zone": "b"}),
        );

        assert_eq!(format_detail(&ops), "~ zone: a -> b");
    }

    #[test]
    fn test_update_from_null_hides_tags() {
        let classifier = ChangeClassifier::new();
        let rc = change(
            &[Action::Update],
            Value::Null,
            json!({"n": 1, "tags": {"env": "dev"}, "tags_all": {"env": "dev"}}),
        );

        let outcome = classifier.classify(&rc, false);
        assert_eq!(outcome.entries[0].detail.as_deref(), Some("~ : null -> {\"n\":1}"));
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(Some(&json!("text"))), "text");
        assert_eq!(render_value(Some(&json!(42))), "42");
        assert_eq!(render_value(Some(&json!(1.5))), "1.5");
        assert_eq!(render_value(Some(&json!(true))), "true");
        assert_eq!(render_value(Some(&Value::Null)), "null");
        assert_eq!(render_value(None), "null");
        assert_eq!(render_value(Some(&json!(["a", 1]))), "[\"a\",1]");
    }

    #[test]
    fn test_apply_records_into_aggregator() {
        let classifier = ChangeClassifier::new();
        let rc = change(
            &[Action::Update],
            json!({"name": "a", "tags": {"env": "dev"}}),
            json!({"name": "b", "tags": {"env": "prod"}}),
        );

        let mut aggregator = ResultAggregator::new();
        classifier.classify(&rc, true).apply(&mut aggregator);

        let results = aggregator.into_result_set();
        assert_eq!(
            results.categories_of("aws_instance.web"),
            vec![Category::Tag, Category::Update]
        );
        assert_eq!(
            results.entries(Category::Update)[0].detail.as_deref(),
            Some("~ name: a -> b")
        );
    }
}
