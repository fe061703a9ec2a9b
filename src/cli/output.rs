//! Output formatting for CLI commands.
//!
//! This module renders a classified plan for the reader: colored text for
//! terminals, Markdown for pull request comments, or JSON for scripting.

use colored::{Color, Colorize};
use std::collections::BTreeMap;
use std::fmt::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::classifier::{AggregatedEntry, Category, ResultSet};
use crate::config::Settings;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Category count row for table display.
#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Resources")]
    count: usize,
}

/// How one category is presented.
struct Section {
    heading: &'static str,
    bullet: &'static str,
    emoji: &'static str,
    color: Color,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a classified plan for display.
    #[must_use]
    pub fn format_summary(&self, results: &ResultSet, settings: &Settings) -> String {
        match self.format {
            OutputFormat::Json => {
                let visible: BTreeMap<Category, &[AggregatedEntry]> =
                    visible_sections(results, settings).collect();
                let mut output = serde_json::to_string_pretty(&visible).unwrap_or_default();
                output.push('\n');
                output
            }
            OutputFormat::Text if settings.markdown => Self::format_summary_markdown(results, settings),
            OutputFormat::Text => Self::format_summary_text(results, settings),
        }
    }

    /// Formats a plan summary as colored text.
    fn format_summary_text(results: &ResultSet, settings: &Settings) -> String {
        let mut output = String::new();

        for (category, entries) in visible_sections(results, settings) {
            let section = Self::section(category);
            let _ = writeln!(output, "{}", section.heading);

            for entry in entries {
                let _ = writeln!(
                    output,
                    "  {} {}",
                    section.bullet.color(section.color),
                    entry.address
                );
                for line in entry.detail.iter().flat_map(|d| d.lines()) {
                    let _ = writeln!(output, "    {}", Self::colorize_detail_line(line));
                }
            }

            if !settings.compact {
                output.push('\n');
            }
        }

        if output.is_empty() {
            return format!("{} No changes.\n", "✓".green());
        }

        if !settings.compact {
            output.push_str(&Self::summary_table(results, settings));
            output.push('\n');
        }

        output
    }

    /// Formats a plan summary as Markdown.
    fn format_summary_markdown(results: &ResultSet, settings: &Settings) -> String {
        let mut output = String::new();

        for (category, entries) in visible_sections(results, settings) {
            let section = Self::section(category);
            let _ = write!(output, "## {}\n\n", section.heading);

            for entry in entries {
                let _ = writeln!(output, "* {} {}", section.emoji, entry.address);
                for line in entry.detail.iter().flat_map(|d| d.lines()) {
                    let _ = writeln!(output, "  * `{line}`");
                }
            }

            if !settings.compact {
                output.push('\n');
            }
        }

        if output.is_empty() {
            return String::from("No changes.\n");
        }

        if !settings.compact {
            output.push_str(&Self::summary_table(results, settings));
            output.push('\n');
        }

        output
    }

    /// Builds the per-category count table.
    fn summary_table(results: &ResultSet, settings: &Settings) -> String {
        let rows: Vec<SummaryRow> = visible_sections(results, settings)
            .map(|(category, entries)| SummaryRow {
                category: Self::section(category).heading.trim_end_matches(':').to_string(),
                count: entries.len(),
            })
            .collect();

        let mut table = Table::new(rows);
        let table = if settings.markdown {
            table.with(Style::markdown())
        } else {
            table.with(Style::modern())
        };
        table.to_string()
    }

    /// Colors the leading symbol of a detail line.
    fn colorize_detail_line(line: &str) -> String {
        let color = match line.chars().next() {
            Some('+') => Color::Green,
            Some('-') => Color::Red,
            Some('~') => Color::Yellow,
            _ => return line.to_string(),
        };
        let (symbol, rest) = line.split_at(1);
        format!("{}{rest}", symbol.color(color))
    }

    /// Returns how a category is presented.
    const fn section(category: Category) -> Section {
        match category {
            Category::NoOp => Section {
                heading: "🔵 Unchanged:",
                bullet: "•",
                emoji: "🔷",
                color: Color::Blue,
            },
            Category::Tag => Section {
                heading: "🟣 Tag/Untag:",
                bullet: "#",
                emoji: "#️⃣",
                color: Color::Magenta,
            },
            Category::Create => Section {
                heading: "🟢 Create:",
                bullet: "+",
                emoji: "✅",
                color: Color::Green,
            },
            Category::Update => Section {
                heading: "🟡 Update:",
                bullet: "~",
                emoji: "⚠️",
                color: Color::Yellow,
            },
            Category::Delete => Section {
                heading: "🔴 Destroy:",
                bullet: "-",
                emoji: "🧨",
                color: Color::Red,
            },
        }
    }
}

/// Non-empty categories the settings allow to be shown, in presentation order.
fn visible_sections<'a>(
    results: &'a ResultSet,
    settings: &'a Settings,
) -> impl Iterator<Item = (Category, &'a [AggregatedEntry])> {
    results.iter().filter(|(category, _)| match category {
        Category::NoOp => settings.show_unchanged,
        Category::Tag => settings.show_tags,
        Category::Create | Category::Update | Category::Delete => true,
    })
}
