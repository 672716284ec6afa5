//! Snippet storage port and its implementations

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::Database;
use crate::error::{Error, Result};
use crate::models::Snippet;

/// Key of the slot holding the vault when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "snippet-storage";

/// Envelope version written by this build.
///
/// Envelopes without a `version` field predate versioning and load as 0.
pub const STATE_SCHEMA_VERSION: u32 = 1;

/// The persisted envelope: `{ "version": 1, "state": { "snippets": [...] } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub version: u32,
    pub state: VaultState,
}

/// The state held inside the envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultState {
    #[serde(default)]
    pub snippets: Vec<Snippet>,
}

#[derive(Deserialize)]
struct VersionHeader {
    #[serde(default)]
    version: u32,
}

impl PersistedState {
    /// Wrap a snippet list in an envelope stamped with the current version.
    #[must_use]
    pub fn new(snippets: Vec<Snippet>) -> Self {
        Self {
            version: STATE_SCHEMA_VERSION,
            state: VaultState { snippets },
        }
    }

    /// Decode a stored envelope.
    ///
    /// The version is checked before the body so that a newer layout reports
    /// `UnsupportedSchema` instead of an arbitrary field error.
    pub fn decode(raw: &str) -> Result<Self> {
        let header: VersionHeader = serde_json::from_str(raw)?;
        if header.version > STATE_SCHEMA_VERSION {
            return Err(Error::UnsupportedSchema {
                found: header.version,
                supported: STATE_SCHEMA_VERSION,
            });
        }
        if header.version == 0 {
            tracing::warn!(
                "Loaded unversioned vault state; it will be rewritten as version {} on next save",
                STATE_SCHEMA_VERSION
            );
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// Encode for storage.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Consume the envelope, yielding the snippet list.
    #[must_use]
    pub fn into_snippets(self) -> Vec<Snippet> {
        self.state.snippets
    }
}

/// Durable storage for the vault's single state slot
pub trait SnippetStorage {
    /// Load the persisted state, or `None` when the slot has never been written
    fn load(&self) -> Result<Option<PersistedState>>;

    /// Replace the persisted state
    fn save(&mut self, state: &PersistedState) -> Result<()>;
}

/// `SQLite` implementation of `SnippetStorage`
pub struct SqliteStorage {
    db: Database,
    key: String,
}

impl SqliteStorage {
    /// Create a storage over an open database using the given slot key
    pub fn new(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    /// Open (or create) a vault database file
    pub fn open(path: impl AsRef<Path>, key: impl Into<String>) -> Result<Self> {
        Ok(Self::new(Database::open(path)?, key))
    }

    /// Open an in-memory vault database
    pub fn open_in_memory(key: impl Into<String>) -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?, key))
    }

    /// The slot key this storage reads and writes
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SnippetStorage for SqliteStorage {
    fn load(&self) -> Result<Option<PersistedState>> {
        let raw: Option<String> = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM kv WHERE key = ?",
                params![self.key],
                |row| row.get(0),
            )
            .optional()?;

        raw.as_deref().map(PersistedState::decode).transpose()
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        let encoded = state.encode()?;
        self.db.connection().execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![self.key, encoded, chrono::Utc::now().to_rfc3339()],
        )?;
        tracing::debug!(
            "Saved {} snippets to slot '{}'",
            state.state.snippets.len(),
            self.key
        );
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemorySlot {
    raw: Option<String>,
    saves: usize,
    fail_saves: bool,
}

/// In-memory `SnippetStorage`.
///
/// Clones share the same slot, so a test can hand one clone to a store and
/// inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<MemorySlot>>,
}

impl MemoryStorage {
    /// Create an empty, never-written slot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-populated with a raw stored value
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.slot.borrow_mut().raw = Some(raw.into());
        storage
    }

    /// Make every subsequent save fail, simulating unavailable storage
    pub fn fail_saves(&self, fail: bool) {
        self.slot.borrow_mut().fail_saves = fail;
    }

    /// Number of successful saves so far
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.slot.borrow().saves
    }

    /// The raw stored value, if any
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().raw.clone()
    }
}

impl SnippetStorage for MemoryStorage {
    fn load(&self) -> Result<Option<PersistedState>> {
        self.slot
            .borrow()
            .raw
            .as_deref()
            .map(PersistedState::decode)
            .transpose()
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        let mut slot = self.slot.borrow_mut();
        if slot.fail_saves {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage is unavailable",
            )));
        }
        slot.raw = Some(state.encode()?);
        slot.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SnippetInput;
    use pretty_assertions::assert_eq;

    fn snippet(title: &str) -> Snippet {
        Snippet::new(SnippetInput {
            title: title.to_string(),
            language: "rust".to_string(),
            code: "fn main() {}".to_string(),
            ..SnippetInput::default()
        })
    }

    #[test]
    fn sqlite_storage_roundtrip() {
        let mut storage = SqliteStorage::open_in_memory(DEFAULT_STORAGE_KEY).unwrap();
        assert!(storage.load().unwrap().is_none());

        let state = PersistedState::new(vec![snippet("one"), snippet("two")]);
        storage.save(&state).unwrap();

        assert_eq!(storage.load().unwrap(), Some(state));
    }

    #[test]
    fn sqlite_storage_overwrites_slot() {
        let mut storage = SqliteStorage::open_in_memory(DEFAULT_STORAGE_KEY).unwrap();
        storage
            .save(&PersistedState::new(vec![snippet("old")]))
            .unwrap();
        storage
            .save(&PersistedState::new(vec![snippet("new")]))
            .unwrap();

        let loaded = storage.load().unwrap().unwrap().into_snippets();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "new");
    }

    #[test]
    fn sqlite_storage_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.db");

        let mut work = SqliteStorage::open(&path, "work").unwrap();
        work.save(&PersistedState::new(vec![snippet("work")]))
            .unwrap();

        let home = SqliteStorage::open(&path, "home").unwrap();
        assert!(home.load().unwrap().is_none());

        let reopened = SqliteStorage::open(&path, "work").unwrap();
        assert_eq!(reopened.key(), "work");
        assert_eq!(reopened.load().unwrap().unwrap().into_snippets().len(), 1);
    }

    #[test]
    fn decode_accepts_unversioned_envelope() {
        let raw = r#"{"state":{"snippets":[{
            "id":"1","title":"Legacy","description":"","language":"go","code":"package main",
            "tags":["go"],"favorite":true,
            "createdAt":"2025-02-15T10:30:00Z","updatedAt":"2025-03-10T14:20:00Z"
        }]}}"#;

        let state = PersistedState::decode(raw).unwrap();
        assert_eq!(state.version, 0);
        assert_eq!(state.state.snippets[0].title, "Legacy");
        assert!(state.state.snippets[0].favorite);
    }

    #[test]
    fn decode_rejects_newer_version() {
        let raw = r#"{"version":7,"state":{"notes":"new layout"}}"#;
        let error = PersistedState::decode(raw).unwrap_err();
        assert!(matches!(
            error,
            Error::UnsupportedSchema {
                found: 7,
                supported: STATE_SCHEMA_VERSION
            }
        ));
    }

    #[test]
    fn decode_rejects_shape_mismatch() {
        let error = PersistedState::decode(r#"{"version":1,"state":[]}"#).unwrap_err();
        assert!(matches!(error, Error::Serialization(_)));
    }

    #[test]
    fn memory_storage_clones_share_slot() {
        let observer = MemoryStorage::new();
        let mut handle = observer.clone();

        handle
            .save(&PersistedState::new(vec![snippet("shared")]))
            .unwrap();

        assert_eq!(observer.save_count(), 1);
        assert!(observer.raw().unwrap().contains("shared"));
    }

    #[test]
    fn memory_storage_can_fail_saves() {
        let mut storage = MemoryStorage::new();
        storage.fail_saves(true);

        let error = storage.save(&PersistedState::new(Vec::new())).unwrap_err();
        assert!(matches!(error, Error::Io(_)));
        assert_eq!(storage.save_count(), 0);
    }
}
