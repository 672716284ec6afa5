//! Snippet list filtering and ordering (search, sort, views, tags).
//!
//! The store never filters; front ends run these helpers over
//! [`crate::SnippetStore::snippets`].

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Snippet;

/// Number of entries shown in the recent view.
pub const RECENT_LIMIT: usize = 6;

/// List ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Most recently updated first
    #[default]
    Newest,
    /// Least recently updated first
    Oldest,
    /// Title A to Z
    TitleAsc,
    /// Title Z to A
    TitleDesc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "title-asc" | "az" | "a-z" => Ok(Self::TitleAsc),
            "title-desc" | "za" | "z-a" => Ok(Self::TitleDesc),
            other => Err(format!(
                "unknown sort order '{other}' (expected newest, oldest, title-asc or title-desc)"
            )),
        }
    }
}

/// Which slice of the list to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    All,
    /// The [`RECENT_LIMIT`] most recently updated matches
    Recent,
    Favorites,
}

/// A complete list query as issued by a front end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetQuery {
    pub search: String,
    pub sort: SortOrder,
    pub view: View,
    /// Exact, case-insensitive tag filter
    pub tag: Option<String>,
}

impl SnippetQuery {
    /// Run the query over a snippet list.
    #[must_use]
    pub fn apply(&self, snippets: &[Snippet]) -> Vec<Snippet> {
        let mut result = filter_snippets(snippets, &self.search, self.tag.as_deref());

        match self.view {
            View::All => sort_snippets(&mut result, self.sort),
            View::Favorites => {
                result.retain(|snippet| snippet.favorite);
                sort_snippets(&mut result, self.sort);
            }
            View::Recent => {
                sort_snippets(&mut result, SortOrder::Newest);
                result.truncate(RECENT_LIMIT);
            }
        }

        result
    }
}

/// Filter snippets by case-insensitive text query and optional exact tag.
///
/// The query matches title, description, code, or any tag as a substring.
#[must_use]
pub fn filter_snippets(
    snippets: &[Snippet],
    search_query: &str,
    tag_filter: Option<&str>,
) -> Vec<Snippet> {
    let normalized_query = normalize_query(search_query);
    let normalized_tag_filter = tag_filter
        .map(normalize_query)
        .filter(|value| !value.is_empty());

    snippets
        .iter()
        .filter(|snippet| snippet_matches_query(snippet, &normalized_query))
        .filter(|snippet| snippet_matches_tag_filter(snippet, normalized_tag_filter.as_deref()))
        .cloned()
        .collect()
}

/// Stable in-place sort; equal keys keep their list order.
pub fn sort_snippets(snippets: &mut [Snippet], order: SortOrder) {
    match order {
        SortOrder::Newest => snippets.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortOrder::Oldest => snippets.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
        SortOrder::TitleAsc => snippets.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortOrder::TitleDesc => snippets.sort_by(|a, b| compare_titles(&b.title, &a.title)),
    }
}

/// Every distinct tag with the number of snippets carrying it, sorted by tag.
///
/// Tags are compared case-insensitively and reported in lowercase.
#[must_use]
pub fn collect_tags(snippets: &[Snippet]) -> Vec<(String, usize)> {
    let mut counts = BTreeMap::new();
    for snippet in snippets {
        let mut seen = snippet
            .tags
            .iter()
            .map(|tag| normalize_query(tag))
            .filter(|tag| !tag.is_empty())
            .collect::<Vec<_>>();
        seen.sort();
        seen.dedup();
        for tag in seen {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// Case-insensitive first so "apple" sorts beside "Apple", raw value as tie-break.
// Code-point order, not locale collation: accented initials sort after 'z'.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn snippet_matches_query(snippet: &Snippet, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    snippet.title.to_lowercase().contains(query)
        || snippet.description.to_lowercase().contains(query)
        || snippet.code.to_lowercase().contains(query)
        || snippet
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
}

fn snippet_matches_tag_filter(snippet: &Snippet, tag_filter: Option<&str>) -> bool {
    let Some(tag_filter) = tag_filter else {
        return true;
    };
    snippet
        .tags
        .iter()
        .any(|tag| normalize_query(tag) == tag_filter)
}
