pub mod add;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod duplicate;
pub mod edit;
pub mod export;
pub mod favorite;
pub mod import;
pub mod languages;
pub mod list;
pub mod search;
pub mod show;
pub mod tags;
