//! Settings types for summarizing plans.
//!
//! These map to the `.tftools.yaml` file. Every option defaults to off.

use serde::{Deserialize, Serialize};

/// Options for `tftools summarize`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Report tag changes in their own category and hide tag paths from diffs.
    pub show_tags: bool,
    /// Report resources without changes.
    pub show_unchanged: bool,
    /// Omit blank lines between sections and the summary table.
    pub compact: bool,
    /// Render Markdown instead of colored text.
    pub markdown: bool,
}

/// Command-line switches layered over loaded settings.
///
/// Flags can only switch an option on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// `--show-tags`.
    pub show_tags: bool,
    /// `--show-unchanged`.
    pub show_unchanged: bool,
    /// `--compact`.
    pub compact: bool,
    /// `--markdown`.
    pub markdown: bool,
}

impl Settings {
    /// Applies command-line switches on top of these settings.
    #[must_use]
    pub const fn with_overrides(self, overrides: SettingsOverrides) -> Self {
        Self {
            show_tags: self.show_tags || overrides.show_tags,
            show_unchanged: self.show_unchanged || overrides.show_unchanged,
            compact: self.compact || overrides.compact,
            markdown: self.markdown || overrides.markdown,
        }
    }
}
