//! SnippetVault CLI - Command-line interface for your snippet vault
//!
//! Save, tag, search and export code snippets from the terminal.

mod cli;
mod commands;
mod config;
mod error;

use std::io;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::duplicate::run_duplicate;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::favorite::run_favorite;
use crate::commands::import::run_import;
use crate::commands::languages::run_languages;
use crate::commands::list::{run_list, ListOptions};
use crate::commands::search::run_search;
use crate::commands::show::run_show;
use crate::commands::tags::run_tags;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snippetvault=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config_path.unwrap_or_else(default_config_path);
    if let Some(Commands::Config { command }) = cli.command {
        return run_config(command, &config_path, cli.db_path);
    }

    let config = CliConfig::load_from_path(&config_path).map_err(CliError::Config)?;

    let db_path = config.resolve_db_path(cli.db_path);
    let store_config = config.store_config();

    match cli.command {
        Some(Commands::Add(args)) => run_add(args, &db_path, &store_config)?,
        Some(Commands::List {
            search,
            sort,
            view,
            tag,
            limit,
            json,
        }) => {
            let options = ListOptions {
                search,
                sort: sort.map_or(config.default_sort, Into::into),
                view: view.into(),
                tag,
                limit,
                as_json: json,
            };
            run_list(options, &db_path, &store_config)?;
        }
        Some(Commands::Search { query, limit, json }) => {
            run_search(&query, limit, json, &db_path, &store_config)?;
        }
        Some(Commands::Show { id, code, json }) => {
            run_show(&id, code, json, &db_path, &store_config)?;
        }
        Some(Commands::Edit(args)) => run_edit(args, &db_path, &store_config)?,
        Some(Commands::Delete { id }) => run_delete(&id, &db_path, &store_config)?,
        Some(Commands::Favorite { id }) => run_favorite(&id, &db_path, &store_config)?,
        Some(Commands::Duplicate { id }) => run_duplicate(&id, &db_path, &store_config)?,
        Some(Commands::Tags { json }) => run_tags(json, &db_path, &store_config)?,
        Some(Commands::Languages) => run_languages(),
        Some(Commands::Export {
            format,
            output,
            to_file,
        }) => {
            run_export(format, output.as_deref(), to_file, &db_path, &store_config)?;
        }
        Some(Commands::Import { path }) => run_import(path.as_deref(), &db_path, &store_config)?,
        Some(Commands::Completions { shell }) => run_completions(shell)?,
        Some(Commands::Config { .. }) => {}
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
