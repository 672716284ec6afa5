use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::Serialize;
use snippetvault_core::models::language_label;
use snippetvault_core::util::truncate_chars;
use snippetvault_core::{Snippet, SnippetId, SnippetStore, StoreConfig};

use crate::error::CliError;

const SHORT_ID_LEN: usize = 13;

#[derive(Debug, Serialize)]
pub struct SnippetListItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub tags: Vec<String>,
    pub favorite: bool,
    pub created_at: String,
    pub updated_at: String,
    pub relative_time: String,
}

pub fn open_store(db_path: &Path, config: &StoreConfig) -> Result<SnippetStore, CliError> {
    tracing::debug!("Opening vault at {}", db_path.display());
    Ok(SnippetStore::open_path(db_path, config)?)
}

pub fn short_id(id: &SnippetId) -> String {
    id.as_str().chars().take(SHORT_ID_LEN).collect()
}

/// Find a snippet by exact id, falling back to a unique id prefix.
pub fn resolve_snippet(snippet_query: &str, store: &SnippetStore) -> Result<Snippet, CliError> {
    if let Some(snippet) = store.get(&SnippetId::from(snippet_query)) {
        return Ok(snippet.clone());
    }

    let matching = store
        .snippets()
        .iter()
        .filter(|snippet| snippet.id.as_str().starts_with(snippet_query))
        .collect::<Vec<_>>();

    match matching.as_slice() {
        [] => Err(CliError::SnippetNotFound(snippet_query.to_string())),
        [snippet] => Ok((*snippet).clone()),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|snippet| short_id(&snippet.id))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousSnippetId(format!(
                "ID prefix '{snippet_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn format_snippet_lines(snippets: &[Snippet]) -> Vec<String> {
    let now = Utc::now();
    snippets
        .iter()
        .map(|snippet| {
            let id = short_id(&snippet.id);
            let marker = if snippet.favorite { '*' } else { ' ' };
            let title = truncate_chars(&snippet.title, 40);
            let language = truncate_chars(language_label(&snippet.language), 12);
            let relative_time = format_relative_time(snippet.updated_at, now);
            let tags = render_tags(snippet);

            if tags.is_empty() {
                format!("{id:<13} {marker} {title:<40}  {language:<12}  {relative_time}")
            } else {
                format!(
                    "{id:<13} {marker} {title:<40}  {language:<12}  {relative_time:<10}  {tags}"
                )
            }
        })
        .collect()
}

pub fn snippet_to_list_item(snippet: &Snippet) -> SnippetListItem {
    SnippetListItem {
        id: snippet.id.to_string(),
        title: snippet.title.clone(),
        description: snippet.description.clone(),
        language: snippet.language.clone(),
        tags: snippet.tags.clone(),
        favorite: snippet.favorite,
        created_at: snippet.created_at.to_rfc3339(),
        updated_at: snippet.updated_at.to_rfc3339(),
        relative_time: format_relative_time(snippet.updated_at, Utc::now()),
    }
}

pub fn render_tags(snippet: &Snippet) -> String {
    snippet
        .tags
        .iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<String>>()
        .join(" ")
}

/// Full, human-readable view of one snippet.
pub fn format_snippet_details(snippet: &Snippet) -> String {
    let mut lines = vec![
        format!("{}{}", snippet.title, if snippet.favorite { " *" } else { "" }),
        format!("id:       {}", snippet.id),
        format!(
            "language: {} ({})",
            language_label(&snippet.language),
            snippet.language
        ),
    ];
    if !snippet.tags.is_empty() {
        lines.push(format!("tags:     {}", render_tags(snippet)));
    }
    lines.push(format!(
        "created:  {}",
        snippet.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    lines.push(format!(
        "updated:  {}",
        snippet.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if !snippet.description.is_empty() {
        lines.push(String::new());
        lines.push(snippet.description.clone());
    }
    lines.push(String::new());
    lines.push(snippet.code.clone());
    lines.join("\n")
}

pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now
        .signed_duration_since(timestamp)
        .num_milliseconds()
        .max(0);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// Snippet code from `--code`, then `--file`, then piped stdin, then `$EDITOR`.
pub fn resolve_snippet_code(
    code: Option<&str>,
    file: Option<&Path>,
) -> Result<String, CliError> {
    if let Some(code) = code.and_then(normalize_code) {
        return Ok(code);
    }

    if let Some(path) = file {
        if let Some(code) = normalize_code(&std::fs::read_to_string(path)?) {
            return Ok(code);
        }
        return Err(CliError::EmptyCode);
    }

    if let Some(code) = read_piped_stdin()? {
        return Ok(code);
    }

    if let Some(code) = capture_editor_input()? {
        return Ok(code);
    }

    Err(CliError::EmptyCode)
}

/// Drop trailing whitespace and surrounding blank lines; keep indentation.
pub fn normalize_code(code: &str) -> Option<String> {
    let trimmed = code.trim_end();
    let trimmed = trimmed.trim_start_matches(['\n', '\r']);
    if trimmed.trim().is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptySearchQuery)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn normalize_snippet_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptySnippetId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_code(&buffer))
}

pub fn capture_editor_input() -> Result<Option<String>, CliError> {
    capture_editor_input_with_initial("")
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_snippet_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let edited = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_code(&edited))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(CliError::EditorFailed(format!(
            "`{editor}` exited with status {status}"
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            // EDITOR may carry arguments, e.g. "code --wait".
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let status = Command::new(program).args(parts).arg(file_path).status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_snippet_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("snippetvault-{}-{now}.txt", std::process::id()))
}
