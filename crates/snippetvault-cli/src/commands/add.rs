use std::path::Path;

use snippetvault_core::{SnippetInput, StoreConfig};

use crate::cli::AddArgs;
use crate::commands::common::{open_store, resolve_snippet_code};
use crate::error::CliError;

pub fn run_add(args: AddArgs, db_path: &Path, config: &StoreConfig) -> Result<(), CliError> {
    let code = resolve_snippet_code(args.code.as_deref(), args.file.as_deref())?;

    let mut input = SnippetInput {
        title: args.title.trim().to_string(),
        description: args.description.trim().to_string(),
        language: args.language.trim().to_string(),
        code,
        tags: Vec::new(),
    };
    for tag in &args.tags {
        input.add_tag(tag);
    }
    input.validate()?;

    let mut store = open_store(db_path, config)?;
    let snippet = store.create(input)?;

    println!("{}", snippet.id);
    Ok(())
}
