use std::io::{self, Read};
use std::path::Path;

use snippetvault_core::StoreConfig;

use crate::commands::common::open_store;
use crate::error::CliError;

pub fn run_import(
    input_path: Option<&Path>,
    db_path: &Path,
    config: &StoreConfig,
) -> Result<(), CliError> {
    let raw = match input_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut store = open_store(db_path, config)?;
    let summary = store.import_json(&raw)?;

    println!("Imported {} snippets", summary.imported);
    for reassignment in &summary.reassigned {
        println!(
            "  id {} already existed; stored as {}",
            reassignment.original, reassignment.assigned
        );
    }
    Ok(())
}
