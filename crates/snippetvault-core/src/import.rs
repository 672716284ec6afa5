//! Import validation for JSON snippet exports.
//!
//! Validation is all-or-nothing: one bad record rejects the whole payload.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Snippet, SnippetId};

/// Keys every imported record must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["id", "title", "language", "code"];

/// Reasons an import payload is rejected
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Please paste your snippet data")]
    Empty,
    #[error("Invalid JSON format. Please check your data and try again. ({0})")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Invalid data format. Expected an array of snippets.")]
    NotAnArray,
    #[error(
        "Some snippets are missing required fields (id, title, language, code): item {} lacks {}",
        index + 1,
        missing.join(", ")
    )]
    MissingFields {
        index: usize,
        missing: Vec<&'static str>,
    },
}

fn missing_fields(value: &Value) -> Vec<&'static str> {
    let Some(object) = value.as_object() else {
        return REQUIRED_FIELDS.to_vec();
    };
    REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !object.contains_key(*field))
        .collect()
}

/// Text form of a field: strings verbatim, `null` empty, anything else as JSON.
fn text_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn tags_value(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| text_value(Some(item)))
            .filter(|tag| !tag.is_empty())
            .collect(),
        Some(Value::String(tag)) if !tag.trim().is_empty() => vec![tag.clone()],
        _ => Vec::new(),
    }
}

/// RFC 3339, a bare date (midnight UTC) or epoch milliseconds.
fn timestamp_value(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|parsed| parsed.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            }),
        Value::Number(number) => number
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

fn record_to_snippet(object: &Map<String, Value>, now: DateTime<Utc>) -> Snippet {
    let created_at = timestamp_value(object.get("createdAt")).unwrap_or(now);
    Snippet {
        id: SnippetId::from(text_value(object.get("id"))),
        title: text_value(object.get("title")),
        description: text_value(object.get("description")),
        language: text_value(object.get("language")),
        code: text_value(object.get("code")),
        tags: tags_value(object.get("tags")),
        favorite: object
            .get("favorite")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        created_at,
        updated_at: timestamp_value(object.get("updatedAt")).unwrap_or(created_at),
    }
}

/// Parse and validate an import payload.
///
/// Only the presence of `id`, `title`, `language` and `code` is checked.
/// Values are coerced instead of type-checked: non-string ids and text become
/// their JSON text, `null` optional fields take their defaults, and
/// timestamps that cannot be read fall back to the import time.
pub fn parse_import(raw: &str) -> Result<Vec<Snippet>, ImportError> {
    if raw.trim().is_empty() {
        return Err(ImportError::Empty);
    }

    let parsed: Value = serde_json::from_str(raw).map_err(ImportError::InvalidJson)?;
    let Value::Array(items) = parsed else {
        return Err(ImportError::NotAnArray);
    };

    for (index, item) in items.iter().enumerate() {
        let missing = missing_fields(item);
        if !missing.is_empty() {
            return Err(ImportError::MissingFields { index, missing });
        }
    }

    let now = Utc::now();
    Ok(items
        .iter()
        .filter_map(Value::as_object)
        .map(|object| record_to_snippet(object, now))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_blank_payload() {
        assert!(matches!(parse_import("  \n "), Err(ImportError::Empty)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_import("[{\"id\": "),
            Err(ImportError::InvalidJson(_))
        ));
    }

    #[test]
    fn rejects_non_array() {
        let error = parse_import(r#"{"id": "1"}"#).unwrap_err();
        assert!(matches!(error, ImportError::NotAnArray));
        assert_eq!(
            error.to_string(),
            "Invalid data format. Expected an array of snippets."
        );
    }

    #[test]
    fn rejects_record_missing_code() {
        let payload = r#"[
            {"id": "1", "title": "ok", "language": "js", "code": "a()"},
            {"id": "2", "title": "broken", "language": "js"}
        ]"#;

        let error = parse_import(payload).unwrap_err();
        match &error {
            ImportError::MissingFields { index, missing } => {
                assert_eq!(*index, 1);
                assert_eq!(missing, &vec!["code"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(error.to_string().ends_with("item 2 lacks code"));
    }

    #[test]
    fn rejects_non_object_items() {
        let error = parse_import("[42]").unwrap_err();
        assert!(matches!(
            error,
            ImportError::MissingFields { index: 0, ref missing } if missing.len() == 4
        ));
    }

    #[test]
    fn numeric_id_becomes_text() {
        let payload = r#"[{"id": 1, "title": "Numbered", "language": "js", "code": "a()"}]"#;
        let snippet = parse_import(payload).unwrap().remove(0);
        assert_eq!(snippet.id.as_str(), "1");
    }

    #[test]
    fn null_optional_fields_take_defaults() {
        let payload = r#"[{
            "id": "n", "title": "Nulls", "language": "js", "code": "a()",
            "description": null, "tags": null, "favorite": null
        }]"#;
        let snippet = parse_import(payload).unwrap().remove(0);
        assert_eq!(snippet.description, "");
        assert!(snippet.tags.is_empty());
        assert!(!snippet.favorite);
    }

    #[test]
    fn bare_date_timestamps_are_midnight_utc() {
        let payload = r#"[{
            "id": "d", "title": "Dated", "language": "js", "code": "a()",
            "createdAt": "2025-02-15"
        }]"#;
        let snippet = parse_import(payload).unwrap().remove(0);
        assert_eq!(snippet.created_at.to_rfc3339(), "2025-02-15T00:00:00+00:00");
        assert_eq!(snippet.updated_at, snippet.created_at);
    }

    #[test]
    fn unreadable_timestamps_fall_back_to_import_time() {
        let before = Utc::now();
        let payload = r#"[{
            "id": "g", "title": "Garbage", "language": "js", "code": "a()",
            "createdAt": "last tuesday", "updatedAt": true
        }]"#;
        let snippet = parse_import(payload).unwrap().remove(0);
        assert!(snippet.created_at >= before);
        assert_eq!(snippet.updated_at, snippet.created_at);
    }

    #[test]
    fn epoch_millis_timestamps_are_read() {
        let payload = r#"[{
            "id": "e", "title": "Epoch", "language": "js", "code": "a()",
            "createdAt": 1739615400000
        }]"#;
        let snippet = parse_import(payload).unwrap().remove(0);
        assert_eq!(snippet.created_at.to_rfc3339(), "2025-02-15T10:30:00+00:00");
    }

    #[test]
    fn non_string_text_fields_are_kept_as_text() {
        let payload = r#"[{"id": "t", "title": 5, "language": "js", "code": "a()"}]"#;
        let snippet = parse_import(payload).unwrap().remove(0);
        assert_eq!(snippet.title, "5");
    }

    #[test]
    fn fills_optional_fields() {
        let payload = r#"[{"id": "x", "title": "Minimal", "language": "sql", "code": "SELECT 1"}]"#;
        let snippets = parse_import(payload).unwrap();

        assert_eq!(snippets.len(), 1);
        let snippet = &snippets[0];
        assert_eq!(snippet.id.as_str(), "x");
        assert_eq!(snippet.description, "");
        assert!(snippet.tags.is_empty());
        assert!(!snippet.favorite);
        assert_eq!(snippet.created_at, snippet.updated_at);
    }

    #[test]
    fn keeps_supplied_fields_verbatim() {
        let payload = r#"[{
            "id": "3", "title": "CSS Grid Layout", "description": "grid",
            "language": "css", "code": ".grid {}", "tags": ["css", "layout"],
            "favorite": true,
            "createdAt": "2025-02-05T16:20:00Z", "updatedAt": "2025-03-01T08:30:00Z"
        }]"#;

        let snippet = parse_import(payload).unwrap().remove(0);
        assert_eq!(snippet.tags, vec!["css", "layout"]);
        assert!(snippet.favorite);
        assert_eq!(snippet.created_at.to_rfc3339(), "2025-02-05T16:20:00+00:00");
        assert_eq!(snippet.updated_at.to_rfc3339(), "2025-03-01T08:30:00+00:00");
    }

    #[test]
    fn accepts_empty_array() {
        assert!(parse_import("[]").unwrap().is_empty());
    }
}
