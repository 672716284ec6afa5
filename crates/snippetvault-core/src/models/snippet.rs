//! Snippet model

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Suffix appended to the title of a duplicated snippet.
pub const DUPLICATE_TITLE_SUFFIX: &str = " (Copy)";

/// An opaque snippet identifier.
///
/// Fresh ids are UUID v7 strings, but imported snippets may carry any
/// string id, so the value is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(String);

impl SnippetId {
    /// Create a new unique snippet ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SnippetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SnippetId {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for SnippetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SnippetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A stored code snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Unique identifier
    pub id: SnippetId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-form language slug, e.g. `rust` or `jsx`
    pub language: String,
    pub code: String,
    /// Tags in insertion order
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub favorite: bool,
    /// Creation timestamp, never mutated
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    /// Create a new snippet from user input with a fresh id and timestamps.
    #[must_use]
    pub fn new(input: SnippetInput) -> Self {
        let now = Utc::now();
        Self {
            id: SnippetId::new(),
            title: input.title,
            description: input.description,
            language: input.language,
            code: input.code,
            tags: input.tags,
            favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a copy of this snippet as a brand new, non-favorite record.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        let now = Utc::now();
        Self {
            id: SnippetId::new(),
            title: format!("{}{DUPLICATE_TITLE_SUFFIX}", self.title),
            description: self.description.clone(),
            language: self.language.clone(),
            code: self.code.clone(),
            tags: self.tags.clone(),
            favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the user-editable fields and bump `updated_at`.
    pub fn apply(&mut self, input: SnippetInput) {
        self.title = input.title;
        self.description = input.description;
        self.language = input.language;
        self.code = input.code;
        self.tags = input.tags;
        self.touch();
    }

    /// Bump `updated_at` to now.
    ///
    /// Never moves backwards and never drops below `created_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at).max(self.created_at);
    }

    /// Current editable fields as an input record.
    #[must_use]
    pub fn to_input(&self) -> SnippetInput {
        SnippetInput {
            title: self.title.clone(),
            description: self.description.clone(),
            language: self.language.clone(),
            code: self.code.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// The user-editable part of a snippet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub language: String,
    pub code: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SnippetInput {
    /// Check the fields an entry form requires.
    ///
    /// The store accepts anything; front ends call this before `create`/`update`.
    pub fn validate(&self) -> Result<()> {
        let missing = [
            ("title", &self.title),
            ("language", &self.language),
            ("code", &self.code),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect::<Vec<_>>();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidInput(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Append a tag unless it is blank or already present.
    ///
    /// Returns whether the tag was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|existing| existing == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Remove a tag, returning whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag.trim());
        self.tags.len() != before
    }
}
