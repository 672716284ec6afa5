//! Data models for SnippetVault

pub mod language;
mod snippet;

pub use language::{highlight_language, language_label, Language, KNOWN_LANGUAGES};
pub use snippet::{Snippet, SnippetId, SnippetInput, DUPLICATE_TITLE_SUFFIX};
