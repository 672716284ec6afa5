use std::path::Path;

use snippetvault_core::query::{filter_snippets, sort_snippets, SortOrder};
use snippetvault_core::{Snippet, StoreConfig};

use crate::commands::common::{
    format_snippet_lines, normalize_search_query, open_store, snippet_to_list_item,
    SnippetListItem,
};
use crate::error::CliError;

pub fn search_snippets(snippets: &[Snippet], query: &str, limit: usize) -> Vec<Snippet> {
    let mut matches = filter_snippets(snippets, query, None);
    sort_snippets(&mut matches, SortOrder::Newest);
    matches.truncate(limit);
    matches
}

pub fn run_search(
    query: &str,
    limit: usize,
    as_json: bool,
    db_path: &Path,
    config: &StoreConfig,
) -> Result<(), CliError> {
    let normalized_query = normalize_search_query(query)?;
    let store = open_store(db_path, config)?;
    let snippets = search_snippets(store.snippets(), &normalized_query, limit);

    if as_json {
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
