//! Persistence layer for SnippetVault
//!
//! The whole vault lives in a single key-value slot. [`SnippetStorage`] is the
//! port the store talks to; [`SqliteStorage`] backs it with a local `SQLite`
//! file and [`MemoryStorage`] is the in-process fake used by tests.

mod connection;
mod migrations;
mod storage;

pub use connection::Database;
pub use storage::{
    MemoryStorage, PersistedState, SnippetStorage, SqliteStorage, VaultState,
    DEFAULT_STORAGE_KEY, STATE_SCHEMA_VERSION,
};
