//! Report rendering
//!
//! Turns a change sequence into the markdown comment body, a plain
//! text summary for terminals, or JSON for downstream tooling. The
//! comparison itself defines no rendering; everything here is
//! presentation.

use std::str::FromStr;

use crate::models::{FieldDelta, LibraryChange};

/// Placeholder rendered when a delta has no updated side
const REMOVED_VALUE: &str = "(removed)";

/// Output format for the diff report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Plain per-library lines
    Text,
    /// CI comment body with a status table
    #[default]
    Markdown,
    /// The change sequence serialized as JSON
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!(
                "unknown format '{other}' (expected text, markdown or json)"
            )),
        }
    }
}

/// Render the markdown comment body for a diff run.
///
/// Layout: heading, tracked-library line, optional warning when
/// changes exist, then either `No changes detected.` or the status
/// table.
pub fn render_markdown(
    libraries: &[String],
    changes: &[LibraryChange],
    warning_text: Option<&str>,
) -> String {
    let mut body = String::from("## Lock file changes\n\n");
    body.push_str(&format!("Target libraries: {}\n\n", libraries.join(", ")));

    if changes.is_empty() {
        body.push_str("No changes detected.\n");
        return body;
    }

    if let Some(warning) = warning_text.filter(|w| !w.is_empty()) {
        body.push_str(&format!(":warning: {warning}\n\n"));
    }

    body.push_str(&render_markdown_table(changes));
    body
}

fn render_markdown_table(changes: &[LibraryChange]) -> String {
    let mut out = String::new();
    out.push_str(&markdown_row(&["Status", "Library", "Diff"]));
    out.push_str(&markdown_row(&["---", "---", "---"]));

    for change in changes {
        let (status, library, detail) = match change {
            LibraryChange::Added { record } => ("ADDED", record.name.as_str(), "-".to_string()),
            LibraryChange::Removed { record } => {
                ("REMOVED", record.name.as_str(), "-".to_string())
            }
            LibraryChange::Updated { name, deltas } => {
                let detail: Vec<String> = deltas.iter().map(render_delta).collect();
                ("UPDATED", name.as_str(), detail.join("<br>"))
            }
        };
        out.push_str(&markdown_row(&[status, library, &detail]));
    }

    out
}

fn markdown_row(cells: &[&str]) -> String {
    format!("| {} |\n", cells.join(" | "))
}

fn render_delta(delta: &FieldDelta) -> String {
    format!(
        "{}: {} -> {}",
        delta.field,
        delta.base,
        delta.updated.as_deref().unwrap_or(REMOVED_VALUE)
    )
}

/// Render the plain text summary for terminal use.
pub fn render_text(changes: &[LibraryChange]) -> String {
    if changes.is_empty() {
        return "No changes detected.\n".to_string();
    }

    let mut out = String::new();
    for change in changes {
        match change {
            LibraryChange::Added { record } => {
                out.push_str(&format!("+ {} {}\n", record.name, record.version));
            }
            LibraryChange::Removed { record } => {
                out.push_str(&format!("- {} {}\n", record.name, record.version));
            }
            LibraryChange::Updated { name, deltas } => {
                out.push_str(&format!("~ {}\n", name));
                for delta in deltas {
                    out.push_str(&format!("    {}\n", render_delta(delta)));
                }
            }
        }
    }
    out
}

/// Render the change sequence as a JSON document.
pub fn render_json(changes: &[LibraryChange]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(changes)
}
