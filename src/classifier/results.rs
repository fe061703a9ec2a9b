//! Result aggregation for classified resource changes.
//!
//! The aggregator is an explicit value owned by one plan run; nothing here
//! is global, so separate runs never see each other's entries.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::plan::Action;

/// Reportable category of a resource change.
///
/// Variants are declared in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Resource is unchanged.
    NoOp,
    /// Resource tags change.
    Tag,
    /// Resource will be created.
    Create,
    /// Resource will be updated in place.
    Update,
    /// Resource will be destroyed.
    Delete,
}

/// A classified resource as shown to the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedEntry {
    /// Resource address.
    pub address: String,
    /// Rendered, tag-filtered diff (updates only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Classified entries grouped by category, each group in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    entries: BTreeMap<Category, Vec<AggregatedEntry>>,
}

/// Accumulates classified entries for one plan run.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    results: ResultSet,
    /// Addresses already recorded, per category.
    seen: HashMap<Category, HashSet<String>>,
}

impl Category {
    /// All categories in presentation order.
    pub const ALL: [Self; 5] = [Self::NoOp, Self::Tag, Self::Create, Self::Update, Self::Delete];

    /// Maps a non-update action token to its category.
    ///
    /// Reads and unrecognized tokens have no reportable category.
    #[must_use]
    pub const fn for_action(action: Action) -> Option<Self> {
        match action {
            Action::Create => Some(Self::Create),
            Action::Update => Some(Self::Update),
            Action::Delete => Some(Self::Delete),
            Action::NoOp => Some(Self::NoOp),
            Action::Read | Action::Unrecognized => None,
        }
    }
}

impl ResultAggregator {
    /// Creates an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry to the category, keeping first-seen order.
    ///
    /// An address already recorded in the same category is ignored.
    pub fn record(&mut self, category: Category, address: &str, detail: Option<String>) {
        if !self.seen.entry(category).or_default().insert(address.to_string()) {
            debug!("Ignoring duplicate {category} entry for {address}");
            return;
        }

        self.results.entries.entry(category).or_default().push(AggregatedEntry {
            address: address.to_string(),
            detail,
        });
    }

    /// Returns a copy of the current results.
    #[must_use]
    pub fn snapshot(&self) -> ResultSet {
        self.results.clone()
    }

    /// Consumes the aggregator and returns its results.
    #[must_use]
    pub fn into_result_set(self) -> ResultSet {
        self.results
    }

    /// Clears all recorded entries.
    pub fn reset(&mut self) {
        self.results.entries.clear();
        self.seen.clear();
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the total number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.total()
    }
}

impl ResultSet {
    /// Returns the entries of a category (empty if none were recorded).
    #[must_use]
    pub fn entries(&self, category: Category) -> &[AggregatedEntry] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the number of entries in a category.
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.entries(category).len()
    }

    /// Returns the total number of entries across categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns true if no category has entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Returns the categories an address was recorded in.
    #[must_use]
    pub fn categories_of(&self, address: &str) -> Vec<Category> {
        self.entries
            .iter()
            .filter(|(_, entries)| entries.iter().any(|e| e.address == address))
            .map(|(category, _)| *category)
            .collect()
    }

    /// Iterates over non-empty categories in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[AggregatedEntry])> {
        self.entries
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(category, entries)| (*category, entries.as_slice()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NoOp => "no-op",
            Self::Tag => "tag",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for AggregatedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.address)?;
        if let Some(detail) = &self.detail {
            for line in detail.lines() {
                write!(f, "\n    {line}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_order() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(Category::Create, "b", None);
        aggregator.record(Category::Create, "a", None);
        aggregator.record(Category::Create, "c", None);

        let results = aggregator.snapshot();
        let addresses: Vec<_> = results
            .entries(Category::Create)
            .iter()
            .map(|e| e.address.as_str())
            .collect();
        assert_eq!(addresses, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_address_ignored_within_category() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(Category::Update, "a", Some(String::from("~ name: a -> b")));
        aggregator.record(Category::Update, "a", None);
        aggregator.record(Category::Tag, "a", None);

        let results = aggregator.into_result_set();
        assert_eq!(results.count(Category::Update), 1);
        assert_eq!(
            results.entries(Category::Update)[0].detail.as_deref(),
            Some("~ name: a -> b")
        );
        assert_eq!(results.categories_of("a"), vec![Category::Tag, Category::Update]);
    }

    #[test]
    fn test_reset() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(Category::Delete, "a", None);
        assert_eq!(aggregator.len(), 1);

        aggregator.reset();
        assert!(aggregator.is_empty());
        assert!(aggregator.snapshot().is_empty());
    }

    #[test]
    fn test_address_can_be_recorded_again_after_reset() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(Category::Create, "a", None);
        aggregator.reset();
        aggregator.record(Category::Create, "a", None);

        assert_eq!(aggregator.snapshot().count(Category::Create), 1);
    }

    #[test]
    fn test_many_distinct_addresses() {
        let mut aggregator = ResultAggregator::new();
        for i in 0..5_000 {
            aggregator.record(Category::NoOp, &format!("null_resource.r[{i}]"), None);
        }
        aggregator.record(Category::NoOp, "null_resource.r[42]", None);

        let results = aggregator.into_result_set();
        assert_eq!(results.count(Category::NoOp), 5_000);
        assert_eq!(results.entries(Category::NoOp)[4_999].address, "null_resource.r[4999]");
    }

    #[test]
    fn test_missing_category_is_empty() {
        let results = ResultSet::default();
        assert!(results.entries(Category::Tag).is_empty());
        assert_eq!(results.count(Category::NoOp), 0);
        assert_eq!(results.iter().count(), 0);
    }

    #[test]
    fn test_category_order_and_mapping() {
        let mut sorted = vec![Category::Delete, Category::Create, Category::Tag, Category::NoOp];
        sorted.sort();
        assert_eq!(
            sorted,
            vec![Category::NoOp, Category::Tag, Category::Create, Category::Delete]
        );

        assert_eq!(Category::for_action(Action::NoOp), Some(Category::NoOp));
        assert_eq!(Category::for_action(Action::Read), None);
        assert_eq!(Category::for_action(Action::Unrecognized), None);
    }

    #[test]
    fn test_serialize_result_set() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(Category::NoOp, "a", None);
        aggregator.record(Category::Update, "b", Some(String::from("- size")));

        let json = serde_json::to_value(aggregator.snapshot()).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({
                "no-op": [{"address": "a"}],
                "update": [{"address": "b", "detail": "- size"}]
            })
        );
    }

    #[test]
    fn test_entry_display_indents_detail() {
        let entry = AggregatedEntry {
            address: String::from("aws_instance.web"),
            detail: Some(String::from("~ ami: x -> y\n- user_data")),
        };
        assert_eq!(
            entry.to_string(),
            "aws_instance.web\n    ~ ami: x -> y\n    - user_data"
        );
    }
}
