use std::path::Path;

use snippetvault_core::StoreConfig;

use crate::commands::common::{normalize_snippet_identifier, open_store, resolve_snippet};
use crate::error::CliError;

pub fn run_delete(id: &str, db_path: &Path, config: &StoreConfig) -> Result<(), CliError> {
    let normalized_id = normalize_snippet_identifier(id)?;
    let mut store = open_store(db_path, config)?;
    let snippet = resolve_snippet(&normalized_id, &store)?;

    store.delete(&snippet.id)?;
    println!("{}", snippet.id);
    Ok(())
}
