//! Languages offered by the snippet entry form.
//!
//! The store treats `Snippet::language` as free-form text; this list only
//! drives pickers and syntax-highlighting hints.

use serde::Serialize;

/// A selectable language: stored slug plus human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub slug: &'static str,
    pub label: &'static str,
}

/// Languages known to the entry form, in picker order.
pub const KNOWN_LANGUAGES: &[Language] = &[
    Language { slug: "javascript", label: "JavaScript" },
    Language { slug: "typescript", label: "TypeScript" },
    Language { slug: "html", label: "HTML" },
    Language { slug: "css", label: "CSS" },
    Language { slug: "jsx", label: "JSX/React" },
    Language { slug: "python", label: "Python" },
    Language { slug: "java", label: "Java" },
    Language { slug: "csharp", label: "C#" },
    Language { slug: "php", label: "PHP" },
    Language { slug: "ruby", label: "Ruby" },
    Language { slug: "go", label: "Go" },
    Language { slug: "rust", label: "Rust" },
    Language { slug: "sql", label: "SQL" },
    Language { slug: "bash", label: "Bash/Shell" },
    Language { slug: "json", label: "JSON" },
    Language { slug: "markdown", label: "Markdown" },
    Language { slug: "yaml", label: "YAML" },
    Language { slug: "graphql", label: "GraphQL" },
];

/// Highlighter grammar used when a slug is not recognised.
pub const FALLBACK_HIGHLIGHT_LANGUAGE: &str = "javascript";

fn find(slug: &str) -> Option<&'static Language> {
    let slug = slug.trim();
    KNOWN_LANGUAGES
        .iter()
        .find(|language| language.slug.eq_ignore_ascii_case(slug))
}

/// Display label for a slug; unknown slugs are shown as-is.
#[must_use]
pub fn language_label(slug: &str) -> &str {
    find(slug).map_or(slug, |language| language.label)
}

/// Grammar name to hand to a syntax highlighter.
#[must_use]
pub fn highlight_language(slug: &str) -> &'static str {
    find(slug).map_or(FALLBACK_HIGHLIGHT_LANGUAGE, |language| language.slug)
}
