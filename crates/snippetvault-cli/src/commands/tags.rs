use std::path::Path;

use serde::Serialize;
use snippetvault_core::query::collect_tags;
use snippetvault_core::StoreConfig;

use crate::commands::common::open_store;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct TagItem {
    name: String,
    count: usize,
}

pub fn run_tags(as_json: bool, db_path: &Path, config: &StoreConfig) -> Result<(), CliError> {
    let store = open_store(db_path, config)?;
    let tags = collect_tags(store.snippets());

    if as_json {
        let items = tags
            .into_iter()
            .map(|(name, count)| TagItem { name, count })
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for (name, count) in tags {
            println!("#{name:<24} {count}");
        }
    }

    Ok(())
}
