//! Snippet export helpers shared by every front end.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Snippet;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Render snippets as a pretty-printed JSON array.
///
/// The output is accepted unchanged by [`crate::import::parse_import`].
pub fn render_json_export(snippets: &[Snippet]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snippets)
}

/// Longest run of backticks in `code`, so the fence can be made longer.
fn longest_backtick_run(code: &str) -> usize {
    code.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}

/// Double-quoted scalar for frontmatter; a JSON string is valid YAML.
fn quoted(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Render snippets in Markdown: a frontmatter block and a fenced code block each.
#[must_use]
pub fn render_markdown_export(snippets: &[Snippet]) -> String {
    let mut output = String::new();

    for (index, snippet) in snippets.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", quoted(snippet.id.as_str()));
        let _ = writeln!(output, "title: {}", quoted(&snippet.title));
        let _ = writeln!(output, "language: {}", quoted(&snippet.language));
        let _ = writeln!(output, "favorite: {}", snippet.favorite);
        let _ = writeln!(output, "created_at: {}", snippet.created_at.to_rfc3339());
        let _ = writeln!(output, "updated_at: {}", snippet.updated_at.to_rfc3339());
        let _ = writeln!(output, "tags:");
        for tag in &snippet.tags {
            let _ = writeln!(output, "  - {}", quoted(tag));
        }
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        if !snippet.description.is_empty() {
            let _ = writeln!(output, "{}", snippet.description);
            let _ = writeln!(output);
        }

        let fence = "`".repeat(longest_backtick_run(&snippet.code).max(2) + 1);
        let _ = writeln!(output, "{fence}{}", snippet.language);
        output.push_str(&snippet.code);
        if !snippet.code.ends_with('\n') {
            output.push('\n');
        }
        let _ = writeln!(output, "{fence}");
    }

    output
}

/// Render snippets based on selected export format.
pub fn render_snippets_export(
    snippets: &[Snippet],
    format: ExportFormat,
) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(snippets),
        ExportFormat::Markdown => Ok(render_markdown_export(snippets)),
    }
}

/// Default download name: `snippetvault-export-<YYYY-MM-DD>.<ext>`.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "snippetvault-export-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}
