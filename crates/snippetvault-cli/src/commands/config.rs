use std::path::{Path, PathBuf};

use snippetvault_core::util::normalize_text_option;

use crate::cli::{ConfigCommands, SortArg};
use crate::config::CliConfig;
use crate::error::CliError;

pub fn run_config(
    command: ConfigCommands,
    config_path: &Path,
    cli_db_path: Option<PathBuf>,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            sort,
            samples,
            no_samples,
        } => {
            let seed_samples = if no_samples {
                Some(false)
            } else {
                samples.then_some(true)
            };
            run_config_init(config_path, cli_db_path, sort, seed_samples).map(|_| ())
        }
        ConfigCommands::Show => run_config_show(config_path, cli_db_path),
    }
}

/// Merge the given settings into the config file, keeping unspecified ones.
pub fn run_config_init(
    config_path: &Path,
    db_path: Option<PathBuf>,
    sort: Option<SortArg>,
    seed_samples: Option<bool>,
) -> Result<CliConfig, CliError> {
    let mut config = CliConfig::load_from_path(config_path).map_err(CliError::Config)?;

    let db_path = normalize_text_option(db_path.map(|path| path.to_string_lossy().into_owned()));
    if let Some(db_path) = db_path {
        config.db_path = Some(PathBuf::from(db_path));
    }
    if let Some(sort) = sort {
        config.default_sort = sort.into();
    }
    if let Some(seed_samples) = seed_samples {
        config.seed_samples = seed_samples;
    }

    config.save_to_path(config_path).map_err(CliError::Config)?;
    println!("Saved config to {}", config_path.display());
    Ok(config)
}

fn run_config_show(config_path: &Path, cli_db_path: Option<PathBuf>) -> Result<(), CliError> {
    let config = CliConfig::load_from_path(config_path).map_err(CliError::Config)?;

    println!("config file:  {}", config_path.display());
    println!("database:     {}", config.resolve_db_path(cli_db_path).display());
    println!("default sort: {}", config.default_sort);
    println!("seed samples: {}", config.seed_samples);
    Ok(())
}
