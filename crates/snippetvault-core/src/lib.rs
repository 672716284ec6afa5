//! snippetvault-core - Core library for SnippetVault
//!
//! This crate contains the snippet model, the snippet store and its
//! persistence layer, and the query/import/export logic shared by every
//! SnippetVault front end.

pub mod db;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod query;
pub mod samples;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use import::ImportError;
pub use models::{Snippet, SnippetId, SnippetInput};
pub use store::{IdReassignment, ImportSummary, SnippetStore, StoreConfig, SubscriptionId};
