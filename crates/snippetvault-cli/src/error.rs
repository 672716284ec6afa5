use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] snippetvault_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No snippet code provided")]
    EmptyCode,
    #[error("Edited snippet code cannot be empty")]
    EmptyEditedCode,
    #[error("Snippet ID cannot be empty")]
    EmptySnippetId,
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Snippet not found for id/prefix: {0}")]
    SnippetNotFound(String),
    #[error("{0}")]
    AmbiguousSnippetId(String),
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
