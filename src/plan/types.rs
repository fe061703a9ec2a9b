//! Plan document types.
//!
//! These types map to the JSON plan representation emitted by Terraform.
//! Only the fields the classifier needs are modelled; everything else in the
//! document is ignored during decoding.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A decoded Terraform plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Plan format version.
    #[serde(default)]
    pub format_version: Option<String>,
    /// Version of Terraform that produced the plan.
    #[serde(default)]
    pub terraform_version: Option<String>,
    /// Proposed resource changes, in plan order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_changes: Vec<ResourceChange>,
}

/// A single resource's proposed transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceChange {
    /// Absolute resource address, including index or key suffixes.
    pub address: String,
    /// Resource mode (`managed` or `data`).
    #[serde(default)]
    pub mode: Option<String>,
    /// Resource type (e.g. `aws_instance`).
    #[serde(default, rename = "type")]
    pub resource_type: Option<String>,
    /// Resource name within its module.
    #[serde(default)]
    pub name: Option<String>,
    /// Provider responsible for the resource.
    #[serde(default)]
    pub provider_name: Option<String>,
    /// Why Terraform chose this action (e.g. `replace_because_tainted`).
    #[serde(default)]
    pub action_reason: Option<String>,
    /// The change itself.
    pub change: Change,
}

/// The before/after snapshot of a resource change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Change {
    /// Actions Terraform will take.
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: ActionSet,
    /// Attribute snapshot before the change (`null` for creates).
    #[serde(default)]
    pub before: Value,
    /// Attribute snapshot after the change (`null` for deletes).
    #[serde(default)]
    pub after: Value,
}

/// A single action token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// No change.
    NoOp,
    /// Resource will be created.
    Create,
    /// Data source will be read.
    Read,
    /// Resource will be updated in place.
    Update,
    /// Resource will be destroyed.
    Delete,
    /// A token this version does not know about.
    #[serde(other)]
    Unrecognized,
}

/// The set of actions for one resource change.
///
/// Duplicates are dropped on construction; the first-seen order is kept so
/// that entries are recorded deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Action>", into = "Vec<Action>")]
pub struct ActionSet(Vec<Action>);

impl ActionSet {
    /// Returns true if the set contains the given action.
    #[must_use]
    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    /// Iterates over the actions in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }

    /// Returns the number of distinct actions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no action is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if this is a replacement (destroy and create).
    #[must_use]
    pub fn is_replace(&self) -> bool {
        self.contains(Action::Delete) && self.contains(Action::Create)
    }
}

impl From<Vec<Action>> for ActionSet {
    fn from(actions: Vec<Action>) -> Self {
        let mut unique = Vec::with_capacity(actions.len());
        for action in actions {
            if !unique.contains(&action) {
                unique.push(action);
            }
        }
        Self(unique)
    }
}

impl From<ActionSet> for Vec<Action> {
    fn from(set: ActionSet) -> Self {
        set.0
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl ResourceChange {
    /// Creates a resource change with only the fields the classifier reads.
    #[must_use]
    pub fn new(address: impl Into<String>, actions: ActionSet, before: Value, after: Value) -> Self {
        Self {
            address: address.into(),
            mode: None,
            resource_type: None,
            name: None,
            provider_name: None,
            action_reason: None,
            change: Change {
                actions,
                before,
                after,
            },
        }
    }
}

/// Decodes an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NoOp => "no-op",
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Unrecognized => "unrecognized",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for ActionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, action) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{action}")?;
        }
        Ok(())
    }
}
