use std::path::Path;

use snippetvault_core::StoreConfig;

use crate::commands::common::{normalize_snippet_identifier, open_store, resolve_snippet};
use crate::error::CliError;

pub fn run_favorite(id: &str, db_path: &Path, config: &StoreConfig) -> Result<(), CliError> {
    let normalized_id = normalize_snippet_identifier(id)?;
    let mut store = open_store(db_path, config)?;
    let snippet = resolve_snippet(&normalized_id, &store)?;

    let updated = store
        .toggle_favorite(&snippet.id)?
        .ok_or_else(|| CliError::SnippetNotFound(normalized_id.clone()))?;
    let state = if updated.favorite { "favorited" } else { "unfavorited" };
    println!("{} {state}", updated.id);
    Ok(())
}
