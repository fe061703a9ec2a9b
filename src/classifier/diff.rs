//! Diff engine for comparing two JSON documents.
//!
//! This module computes a structural, path-addressed diff between two
//! arbitrary JSON values. It knows nothing about resources or tags; any
//! filtering happens in the caller.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::DiffError;

/// Engine for computing structural diffs between JSON values.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiffEngine;

/// Kind of a single diff operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// A value appears at the path.
    Add,
    /// The value at the path disappears.
    Remove,
    /// The value at the path is substituted.
    Replace,
}

/// A single operation turning `before` into `after`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffOperation {
    /// Type of operation.
    pub kind: DiffKind,
    /// Dot-delimited field path (e.g. `root_block_device.0.volume_size`).
    pub path: String,
    /// RFC 6901 pointer the path was derived from.
    pub pointer: String,
    /// Previous value (for removals and replacements).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    /// New value (for additions and replacements).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

impl DiffEngine {
    /// Creates a new diff engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes the operations that transform `before` into `after`.
    ///
    /// Object keys are visited in sorted order, so the output is
    /// deterministic for a given pair of inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if either side cannot be represented as JSON.
    pub fn diff<B, A>(&self, before: &B, after: &A) -> Result<Vec<DiffOperation>, DiffError>
    where
        B: Serialize + ?Sized,
        A: Serialize + ?Sized,
    {
        let before = serde_json::to_value(before)
            .map_err(|e| DiffError::serialization("before", e.to_string()))?;
        let after = serde_json::to_value(after)
            .map_err(|e| DiffError::serialization("after", e.to_string()))?;

        Ok(self.diff_values(&before, &after))
    }

    /// Computes the operations between two already-decoded JSON values.
    #[must_use]
    pub fn diff_values(&self, before: &Value, after: &Value) -> Vec<DiffOperation> {
        let mut ops = Vec::new();
        Self::compare(&mut Vec::new(), before, after, &mut ops);
        trace!("Computed {} diff operations", ops.len());
        ops
    }

    fn compare(path: &mut Vec<String>, before: &Value, after: &Value, ops: &mut Vec<DiffOperation>) {
        if before == after {
            return;
        }

        match (before, after) {
            (Value::Object(old), Value::Object(new)) => Self::compare_objects(path, old, new, ops),
            (Value::Array(old), Value::Array(new)) => Self::compare_arrays(path, old, new, ops),
            _ => ops.push(DiffOperation::new(
                DiffKind::Replace,
                path,
                Some(before.clone()),
                Some(after.clone()),
            )),
        }
    }

    fn compare_objects(
        path: &mut Vec<String>,
        old: &Map<String, Value>,
        new: &Map<String, Value>,
        ops: &mut Vec<DiffOperation>,
    ) {
        let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();

        for key in keys {
            path.push(key.clone());
            match (old.get(key), new.get(key)) {
                (Some(before), Some(after)) => Self::compare(path, before, after, ops),
                (Some(before), None) => {
                    ops.push(DiffOperation::new(DiffKind::Remove, path, Some(before.clone()), None));
                }
                (None, Some(after)) => {
                    ops.push(DiffOperation::new(DiffKind::Add, path, None, Some(after.clone())));
                }
                (None, None) => {}
            }
            path.pop();
        }
    }

    fn compare_arrays(path: &mut Vec<String>, old: &[Value], new: &[Value], ops: &mut Vec<DiffOperation>) {
        let shared = old.len().min(new.len());

        for (i, (before, after)) in old.iter().zip(new).enumerate() {
            path.push(i.to_string());
            Self::compare(path, before, after, ops);
            path.pop();
        }

        // Highest index first so earlier removals don't shift later ones
        for (i, before) in old.iter().enumerate().skip(shared).rev() {
            path.push(i.to_string());
            ops.push(DiffOperation::new(DiffKind::Remove, path, Some(before.clone()), None));
            path.pop();
        }

        for (i, after) in new.iter().enumerate().skip(shared) {
            path.push(i.to_string());
            ops.push(DiffOperation::new(DiffKind::Add, path, None, Some(after.clone())));
            path.pop();
        }
    }
}

impl DiffOperation {
    fn new(kind: DiffKind, segments: &[String], old_value: Option<Value>, new_value: Option<Value>) -> Self {
        let pointer = to_pointer(segments);
        Self {
            kind,
            path: pointer_to_path(&pointer),
            pointer,
            old_value,
            new_value,
        }
    }

    /// Returns true if the path starts with the given prefix.
    #[must_use]
    pub fn path_starts_with(&self, prefix: &str) -> bool {
        self.path.starts_with(prefix)
    }
}

/// Builds an RFC 6901 pointer from unescaped path segments.
fn to_pointer(segments: &[String]) -> String {
    segments.iter().fold(String::new(), |mut pointer, segment| {
        pointer.push('/');
        pointer.push_str(&segment.replace('~', "~0").replace('/', "~1"));
        pointer
    })
}

/// Converts a JSON pointer into a dotted field path.
///
/// The leading separator is stripped and every `/` becomes `.`; escaped
/// segment characters are left as they appear in the pointer.
#[must_use]
pub fn pointer_to_path(pointer: &str) -> String {
    let dotted = pointer.replace('/', ".");
    dotted.strip_prefix('.').map_or(dotted.clone(), String::from)
}

impl std::fmt::Display for DiffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Replace => "replace",
        };
        write!(f, "{s}")
    }
}
