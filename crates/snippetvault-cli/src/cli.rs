use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use snippetvault_core::query::{SortOrder, View};

#[derive(Parser)]
#[command(name = "snippetvault")]
#[command(about = "Organize, tag and search your code snippets from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local vault database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Optional path to the CLI config file
    #[arg(long = "config-file", global = true, value_name = "PATH")]
    pub config_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new snippet
    #[command(alias = "new")]
    Add(AddArgs),
    /// List snippets
    #[command(alias = "ls")]
    List {
        /// Only show snippets matching this text
        #[arg(short, long)]
        search: Option<String>,
        /// Sort order (defaults to the configured sort)
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        /// Which snippets to show
        #[arg(long, value_enum, default_value_t = ViewArg::All)]
        view: ViewArg,
        /// Filter snippets by tag name
        #[arg(long)]
        tag: Option<String>,
        /// Maximum number of snippets to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search snippets by title, description, code or tag
    Search {
        /// Search query
        query: String,
        /// Number of snippets to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single snippet
    Show {
        /// Snippet ID or unique ID prefix
        id: String,
        /// Print only the raw code (for piping to a clipboard tool)
        #[arg(long, conflicts_with = "json")]
        code: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing snippet
    Edit(EditArgs),
    /// Delete an existing snippet
    #[command(alias = "rm")]
    Delete {
        /// Snippet ID or unique ID prefix
        id: String,
    },
    /// Toggle the favorite flag of a snippet
    #[command(alias = "fav")]
    Favorite {
        /// Snippet ID or unique ID prefix
        id: String,
    },
    /// Copy a snippet as a new snippet titled "<title> (Copy)"
    Duplicate {
        /// Snippet ID or unique ID prefix
        id: String,
    },
    /// List tags with usage counts
    Tags {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the languages offered for new snippets
    Languages,
    /// Export all snippets
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH", conflicts_with = "to_file")]
        output: Option<PathBuf>,
        /// Write to snippetvault-export-<date> in the current directory
        #[arg(long)]
        to_file: bool,
    },
    /// Import snippets from a JSON export
    Import {
        /// JSON file to import (reads stdin when omitted)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Configure the CLI
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Print a shell completion script
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Snippet title
    #[arg(short, long)]
    pub title: String,
    /// Language slug (see `snippetvault languages`)
    #[arg(short, long)]
    pub language: String,
    /// Optional description
    #[arg(short, long, default_value = "")]
    pub description: String,
    /// Tag to attach (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
    /// Snippet code (falls back to --file, piped stdin, then $EDITOR)
    #[arg(short, long, conflicts_with = "file")]
    pub code: Option<String>,
    /// Read snippet code from a file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Snippet ID or unique ID prefix
    pub id: String,
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,
    /// New language slug
    #[arg(short, long)]
    pub language: Option<String>,
    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Replace all tags (repeatable)
    #[arg(long = "tag", value_name = "TAG", conflicts_with = "add_tags")]
    pub tags: Vec<String>,
    /// Add a tag, keeping existing ones (repeatable)
    #[arg(long = "add-tag", value_name = "TAG")]
    pub add_tags: Vec<String>,
    /// Remove a tag (repeatable)
    #[arg(long = "remove-tag", value_name = "TAG")]
    pub remove_tags: Vec<String>,
    /// New code
    #[arg(short, long, conflicts_with = "file")]
    pub code: Option<String>,
    /// Read new code from a file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl EditArgs {
    /// Whether any field flag was given; without one the code opens in `$EDITOR`.
    pub fn has_field_changes(&self) -> bool {
        self.title.is_some()
            || self.language.is_some()
            || self.description.is_some()
            || !self.tags.is_empty()
            || !self.add_tags.is_empty()
            || !self.remove_tags.is_empty()
            || self.code.is_some()
            || self.file.is_some()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SortArg {
    Newest,
    Oldest,
    #[value(alias = "az")]
    TitleAsc,
    #[value(alias = "za")]
    TitleDesc,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Newest => Self::Newest,
            SortArg::Oldest => Self::Oldest,
            SortArg::TitleAsc => Self::TitleAsc,
            SortArg::TitleDesc => Self::TitleDesc,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ViewArg {
    All,
    Recent,
    Favorites,
}

impl From<ViewArg> for View {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::All => Self::All,
            ViewArg::Recent => Self::Recent,
            ViewArg::Favorites => Self::Favorites,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl From<ExportFormat> for snippetvault_core::export::ExportFormat {
    fn from(value: ExportFormat) -> Self {
        match value {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

impl From<CompletionShell> for clap_complete::Shell {
    fn from(value: CompletionShell) -> Self {
        match value {
            CompletionShell::Bash => Self::Bash,
            CompletionShell::Zsh => Self::Zsh,
            CompletionShell::Fish => Self::Fish,
            CompletionShell::PowerShell => Self::PowerShell,
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create or update the config file; `--db-path` sets the default vault
    Init {
        /// Default sort order for `list`
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        /// Seed sample snippets into a new vault
        #[arg(long, overrides_with = "no_samples")]
        samples: bool,
        /// Start new vaults empty
        #[arg(long)]
        no_samples: bool,
    },
    /// Print the effective configuration
    Show,
}
