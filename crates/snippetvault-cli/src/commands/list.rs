use std::path::Path;

use snippetvault_core::query::{SnippetQuery, SortOrder, View};
use snippetvault_core::StoreConfig;

use crate::commands::common::{
    format_snippet_lines, open_store, snippet_to_list_item, SnippetListItem,
};
use crate::error::CliError;

pub struct ListOptions {
    pub search: Option<String>,
    pub sort: SortOrder,
    pub view: View,
    pub tag: Option<String>,
    pub limit: Option<usize>,
    pub as_json: bool,
}

pub fn run_list(options: ListOptions, db_path: &Path, config: &StoreConfig) -> Result<(), CliError> {
    let store = open_store(db_path, config)?;
    let query = SnippetQuery {
        search: options.search.unwrap_or_default(),
        sort: options.sort,
        view: options.view,
        tag: options.tag,
    };

    let mut snippets = query.apply(store.snippets());
    if let Some(limit) = options.limit {
        snippets.truncate(limit);
    }

    if options.as_json {
        let json_items = snippets
            .iter()
            .map(snippet_to_list_item)
            .collect::<Vec<SnippetListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_snippet_lines(&snippets) {
            println!("{line}");
        }
    }

    Ok(())
}
