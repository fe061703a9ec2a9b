//! Tag change detection.
//!
//! Answers two questions about a before/after pair of resource attribute
//! snapshots: did any tag field change, and are the tag fields the only
//! thing that changed.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::DiffError;

/// Attribute keys that carry resource tags.
pub const TAG_KEYS: [&str; 2] = ["tags", "tags_all"];

/// Detector for tag-related changes between two attribute snapshots.
#[derive(Debug, Default, Clone, Copy)]
pub struct TagDetector;

impl TagDetector {
    /// Creates a new tag detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns true unless both `tags` and `tags_all` are unchanged.
    ///
    /// A key missing from one side compares equal to an explicit `null`.
    ///
    /// # Errors
    ///
    /// Returns an error if either side cannot be represented as JSON.
    pub fn has_tag_change<B, A>(&self, before: &B, after: &A) -> Result<bool, DiffError>
    where
        B: Serialize + ?Sized,
        A: Serialize + ?Sized,
    {
        let before = attributes(before, "before")?;
        let after = attributes(after, "after")?;

        Ok(TAG_KEYS
            .iter()
            .any(|key| before.get(*key).unwrap_or(&Value::Null) != after.get(*key).unwrap_or(&Value::Null)))
    }

    /// Returns true if something changed and every non-tag key is identical.
    ///
    /// Identical snapshots are not a tag-only change: nothing changed at all.
    /// A non-tag key present on only one side always disqualifies, whatever
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns an error if either side cannot be represented as JSON.
    pub fn is_tag_only_change<B, A>(&self, before: &B, after: &A) -> Result<bool, DiffError>
    where
        B: Serialize + ?Sized,
        A: Serialize + ?Sized,
    {
        let before = attributes(before, "before")?;
        let after = attributes(after, "after")?;

        if before == after {
            return Ok(false);
        }

        let other_keys_match = before
            .keys()
            .chain(after.keys())
            .filter(|key| !is_tag_key(key))
            .all(|key| before.get(key) == after.get(key));

        Ok(other_keys_match)
    }
}

/// Returns true if the attribute key holds tags.
#[must_use]
pub fn is_tag_key(key: &str) -> bool {
    TAG_KEYS.contains(&key)
}

/// Coerces a snapshot to a string-keyed map; non-objects become empty.
fn attributes<T: Serialize + ?Sized>(value: &T, side: &'static str) -> Result<Map<String, Value>, DiffError> {
    match serde_json::to_value(value).map_err(|e| DiffError::serialization(side, e.to_string()))? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}
