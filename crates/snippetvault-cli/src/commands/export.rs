use std::path::{Path, PathBuf};

use chrono::Utc;
use snippetvault_core::export::{render_snippets_export, suggested_export_file_name};
use snippetvault_core::StoreConfig;

use crate::cli::ExportFormat;
use crate::commands::common::open_store;
use crate::error::CliError;

pub fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    to_file: bool,
    db_path: &Path,
    config: &StoreConfig,
) -> Result<(), CliError> {
    let store = open_store(db_path, config)?;
    let format = format.into();
    let rendered = render_snippets_export(&store.export(), format)?;

    let target = output_path.map(Path::to_path_buf).or_else(|| {
        to_file.then(|| PathBuf::from(suggested_export_file_name(format, Utc::now().date_naive())))
    });

    if let Some(path) = target {
        std::fs::write(&path, rendered)?;
        tracing::info!("Exported {} snippets", store.len());
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
