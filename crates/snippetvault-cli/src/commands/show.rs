use std::path::Path;

use snippetvault_core::StoreConfig;

use crate::commands::common::{
    format_snippet_details, normalize_snippet_identifier, open_store, resolve_snippet,
};
use crate::error::CliError;

pub fn run_show(
    id: &str,
    code_only: bool,
    as_json: bool,
    db_path: &Path,
    config: &StoreConfig,
) -> Result<(), CliError> {
    let normalized_id = normalize_snippet_identifier(id)?;
    let store = open_store(db_path, config)?;
    let snippet = resolve_snippet(&normalized_id, &store)?;

    if code_only {
        println!("{}", snippet.code);
    } else if as_json {
        println!("{}", serde_json::to_string_pretty(&snippet)?);
    } else {
        println!("{}", format_snippet_details(&snippet));
    }

    Ok(())
}
