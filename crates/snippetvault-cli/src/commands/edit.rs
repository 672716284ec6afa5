use std::path::Path;

use snippetvault_core::{Snippet, SnippetInput, StoreConfig};

use crate::cli::EditArgs;
use crate::commands::common::{
    capture_editor_input_with_initial, normalize_code, normalize_snippet_identifier, open_store,
    resolve_snippet,
};
use crate::error::CliError;

/// Apply field flags to the current snippet fields.
pub fn apply_edit_args(snippet: &Snippet, args: &EditArgs) -> Result<SnippetInput, CliError> {
    let mut input = snippet.to_input();

    if let Some(title) = &args.title {
        input.title = title.trim().to_string();
    }
    if let Some(language) = &args.language {
        input.language = language.trim().to_string();
    }
    if let Some(description) = &args.description {
        input.description = description.trim().to_string();
    }
    if !args.tags.is_empty() {
        input.tags.clear();
        for tag in &args.tags {
            input.add_tag(tag);
        }
    }
    for tag in &args.add_tags {
        input.add_tag(tag);
    }
    for tag in &args.remove_tags {
        input.remove_tag(tag);
    }
    if let Some(code) = &args.code {
        input.code = normalize_code(code).ok_or(CliError::EmptyEditedCode)?;
    } else if let Some(path) = &args.file {
        input.code =
            normalize_code(&std::fs::read_to_string(path)?).ok_or(CliError::EmptyEditedCode)?;
    }

    Ok(input)
}

pub fn run_edit(args: EditArgs, db_path: &Path, config: &StoreConfig) -> Result<(), CliError> {
    let normalized_id = normalize_snippet_identifier(&args.id)?;
    let mut store = open_store(db_path, config)?;
    let snippet = resolve_snippet(&normalized_id, &store)?;

    let input = if args.has_field_changes() {
        apply_edit_args(&snippet, &args)?
    } else {
        let Some(edited_code) = capture_editor_input_with_initial(&snippet.code)? else {
            return Err(CliError::EmptyEditedCode);
        };
        SnippetInput {
            code: edited_code,
            ..snippet.to_input()
        }
    };

    if input == snippet.to_input() {
        println!("{}", snippet.id);
        return Ok(());
    }

    input.validate()?;
    let updated = store
        .update(&snippet.id, input)?
        .ok_or_else(|| CliError::SnippetNotFound(normalized_id.clone()))?;
    println!("{}", updated.id);
    Ok(())
}
