//! The snippet store: sole owner of the vault's snippet list.
//!
//! Every mutation builds the next list, writes it through the storage port,
//! and only then swaps it in and notifies subscribers. A failed save leaves
//! the in-memory list untouched. Operations on unknown ids are silent no-ops
//! that neither persist nor notify.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::db::{PersistedState, SnippetStorage, SqliteStorage, DEFAULT_STORAGE_KEY};
use crate::error::Result;
use crate::import::parse_import;
use crate::models::{Snippet, SnippetId, SnippetInput};
use crate::samples::sample_snippets;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Storage slot holding the vault
    pub storage_key: String,
    /// Seed the sample snippets when the slot has never been written
    pub seed_samples: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_samples: false,
        }
    }
}

/// Handle returned by [`SnippetStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Snippet])>;

/// An imported snippet whose id collided and was replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdReassignment {
    pub original: SnippetId,
    pub assigned: SnippetId,
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub reassigned: Vec<IdReassignment>,
}

pub struct SnippetStore {
    snippets: Vec<Snippet>,
    storage: Box<dyn SnippetStorage>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for SnippetStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SnippetStore")
            .field("snippets", &self.snippets.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl SnippetStore {
    /// Open a store over the given storage, rehydrating persisted state.
    pub fn open(storage: impl SnippetStorage + 'static, config: &StoreConfig) -> Result<Self> {
        let mut store = Self {
            snippets: Vec::new(),
            storage: Box::new(storage),
            listeners: Vec::new(),
            next_subscription: 0,
        };

        match store.storage.load()? {
            Some(state) => {
                let mut snippets = state.into_snippets();
                let reassigned = assign_unique_ids(&mut snippets, &mut HashSet::new());
                if reassigned.is_empty() {
                    store.snippets = snippets;
                } else {
                    tracing::warn!(
                        "Reassigned {} duplicate snippet ids found in storage",
                        reassigned.len()
                    );
                    store.commit(snippets)?;
                }
                tracing::info!("Loaded {} snippets", store.snippets.len());
            }
            None if config.seed_samples => {
                tracing::info!("Empty vault; seeding sample snippets");
                store.commit(sample_snippets())?;
            }
            None => tracing::info!("Empty vault"),
        }

        Ok(store)
    }

    /// Open a store backed by a `SQLite` file.
    pub fn open_path(path: impl AsRef<Path>, config: &StoreConfig) -> Result<Self> {
        let storage = SqliteStorage::open(path, config.storage_key.clone())?;
        Self::open(storage, config)
    }

    /// Current snippets, newest-created/imported first.
    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    /// Look up a snippet by id.
    pub fn get(&self, id: &SnippetId) -> Option<&Snippet> {
        self.snippets.iter().find(|snippet| &snippet.id == id)
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Create a snippet at the head of the list.
    pub fn create(&mut self, input: SnippetInput) -> Result<Snippet> {
        let snippet = Snippet::new(input);
        let mut next = Vec::with_capacity(self.snippets.len() + 1);
        next.push(snippet.clone());
        next.extend(self.snippets.iter().cloned());

        self.commit(next)?;
        tracing::debug!("Created snippet {}", snippet.id);
        Ok(snippet)
    }

    /// Replace the editable fields of a snippet.
    ///
    /// Returns `None` without persisting when the id is unknown.
    pub fn update(&mut self, id: &SnippetId, input: SnippetInput) -> Result<Option<Snippet>> {
        self.modify(id, |snippet| snippet.apply(input))
    }

    /// Flip the favorite flag of a snippet.
    pub fn toggle_favorite(&mut self, id: &SnippetId) -> Result<Option<Snippet>> {
        self.modify(id, |snippet| {
            snippet.favorite = !snippet.favorite;
            snippet.touch();
        })
    }

    /// Remove a snippet. Returns whether anything was removed.
    pub fn delete(&mut self, id: &SnippetId) -> Result<bool> {
        if self.get(id).is_none() {
            tracing::debug!("Delete ignored; no snippet {id}");
            return Ok(false);
        }

        let next = self
            .snippets
            .iter()
            .filter(|snippet| &snippet.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        tracing::debug!("Deleted snippet {id}");
        Ok(true)
    }

    /// Copy a snippet as a new, non-favorite record at the head of the list.
    pub fn duplicate(&mut self, id: &SnippetId) -> Result<Option<Snippet>> {
        let Some(copy) = self.get(id).map(Snippet::duplicate) else {
            tracing::debug!("Duplicate ignored; no snippet {id}");
            return Ok(None);
        };

        let mut next = Vec::with_capacity(self.snippets.len() + 1);
        next.push(copy.clone());
        next.extend(self.snippets.iter().cloned());

        self.commit(next)?;
        tracing::debug!("Duplicated snippet {id} as {}", copy.id);
        Ok(Some(copy))
    }

    /// Prepend fully-formed snippets, keeping their order.
    ///
    /// Ids are trusted unless they collide with an existing snippet or an
    /// earlier record of the same batch; colliding records get a fresh id.
    pub fn import(&mut self, records: Vec<Snippet>) -> Result<ImportSummary> {
        if records.is_empty() {
            return Ok(ImportSummary::default());
        }

        let mut incoming = records;
        let mut seen = self
            .snippets
            .iter()
            .map(|snippet| snippet.id.clone())
            .collect::<HashSet<_>>();
        let reassigned = assign_unique_ids(&mut incoming, &mut seen);
        let imported = incoming.len();

        incoming.extend(self.snippets.iter().cloned());
        self.commit(incoming)?;

        if !reassigned.is_empty() {
            tracing::warn!(
                "Reassigned {} colliding snippet ids during import",
                reassigned.len()
            );
        }
        tracing::info!("Imported {imported} snippets");
        Ok(ImportSummary {
            imported,
            reassigned,
        })
    }

    /// Validate and import a JSON export payload, all-or-nothing.
    pub fn import_json(&mut self, raw: &str) -> Result<ImportSummary> {
        let records = parse_import(raw)?;
        self.import(records)
    }

    /// The full list, unmodified, in current order.
    pub fn export(&self) -> Vec<Snippet> {
        self.snippets.clone()
    }

    /// Register a listener that receives the new list after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Snippet]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn modify(
        &mut self,
        id: &SnippetId,
        change: impl FnOnce(&mut Snippet),
    ) -> Result<Option<Snippet>> {
        let Some(index) = self.snippets.iter().position(|snippet| &snippet.id == id) else {
            tracing::debug!("Update ignored; no snippet {id}");
            return Ok(None);
        };

        let mut next = self.snippets.clone();
        change(&mut next[index]);
        let changed = next[index].clone();

        self.commit(next)?;
        tracing::debug!("Updated snippet {id}");
        Ok(Some(changed))
    }

    fn commit(&mut self, next: Vec<Snippet>) -> Result<()> {
        let state = PersistedState::new(next);
        self.storage.save(&state)?;
        self.snippets = state.into_snippets();

        for (_, listener) in &mut self.listeners {
            listener(&self.snippets);
        }
        Ok(())
    }
}

/// Give every snippet whose id is already in `seen` a fresh id.
fn assign_unique_ids(
    snippets: &mut [Snippet],
    seen: &mut HashSet<SnippetId>,
) -> Vec<IdReassignment> {
    let mut reassigned = Vec::new();
    for snippet in snippets {
        if seen.insert(snippet.id.clone()) {
            continue;
        }
        let assigned = SnippetId::new();
        seen.insert(assigned.clone());
        let original = std::mem::replace(&mut snippet.id, assigned.clone());
        reassigned.push(IdReassignment { original, assigned });
    }
    reassigned
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::db::MemoryStorage;
    use crate::Error;

    fn input(title: &str) -> SnippetInput {
        SnippetInput {
            title: title.to_string(),
            description: format!("{title} description"),
            language: "rust".to_string(),
            code: format!("// {title}"),
            tags: vec!["tag-a".to_string(), "tag-b".to_string()],
        }
    }

    fn open_store() -> (SnippetStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = SnippetStore::open(storage.clone(), &StoreConfig::default()).unwrap();
        (store, storage)
    }

    fn fixed(id: &str, title: &str) -> Snippet {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Snippet {
            id: SnippetId::from(id),
            title: title.to_string(),
            description: String::new(),
            language: "go".to_string(),
            code: "package main".to_string(),
            tags: Vec::new(),
            favorite: true,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn open_empty_storage_without_seeding() {
        let (store, storage) = open_store();
        assert!(store.is_empty());
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn open_seeds_samples_once() {
        let storage = MemoryStorage::new();
        let config = StoreConfig {
            seed_samples: true,
            ..StoreConfig::default()
        };

        let mut store = SnippetStore::open(storage.clone(), &config).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(storage.save_count(), 1);

        for snippet in store.export() {
            store.delete(&snippet.id).unwrap();
        }

        let reopened = SnippetStore::open(storage, &config).unwrap();
        assert!(reopened.is_empty());
    }

    #[test]
    fn create_inserts_at_head_with_fresh_fields() {
        let (mut store, storage) = open_store();
        let first = store.create(input("first")).unwrap();
        let second = store.create(input("second")).unwrap();

        let exported = store.export();
        assert_eq!(exported.len(), 2);
        assert_eq!(exported[0].id, second.id);
        assert_eq!(exported[1].id, first.id);

        assert_eq!(second.to_input(), input("second"));
        assert!(!second.favorite);
        assert_eq!(second.created_at, second.updated_at);
        assert_eq!(storage.save_count(), 2);
    }

    #[test]
    fn update_changes_only_editable_fields() {
        let (mut store, _storage) = open_store();
        let created = store.create(input("before")).unwrap();
        store.toggle_favorite(&created.id).unwrap();
        let favorited = store.get(&created.id).unwrap().clone();

        let updated = store
            .update(&created.id, input("after"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.favorite);
        assert_eq!(updated.title, "after");
        assert_eq!(updated.code, "// after");
        assert!(updated.updated_at >= favorited.updated_at);
        assert_eq!(store.get(&created.id), Some(&updated));
    }

    #[test]
    fn update_unknown_id_is_silent_noop() {
        let (mut store, storage) = open_store();
        store.create(input("kept")).unwrap();
        let before = store.export();

        let result = store.update(&SnippetId::from("missing"), input("x")).unwrap();

        assert!(result.is_none());
        assert_eq!(store.export(), before);
        assert_eq!(storage.save_count(), 1);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let (mut store, _storage) = open_store();
        let keep = store.create(input("keep")).unwrap();
        let remove = store.create(input("remove")).unwrap();

        assert!(store.delete(&remove.id).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(store.snippets()[0].id, keep.id);
    }

    #[test]
    fn delete_unknown_id_leaves_list_unchanged() {
        let (mut store, storage) = open_store();
        store.create(input("only")).unwrap();
        let before = store.export();

        assert!(!store.delete(&SnippetId::from("nope")).unwrap());
        assert_eq!(store.export(), before);
        assert_eq!(storage.save_count(), 1);
    }

    #[test]
    fn toggle_favorite_flips_and_bumps_updated_at() {
        let (mut store, _storage) = open_store();
        let created = store.create(input("star me")).unwrap();

        let starred = store.toggle_favorite(&created.id).unwrap().unwrap();
        assert!(starred.favorite);
        assert!(starred.updated_at >= created.updated_at);

        let unstarred = store.toggle_favorite(&created.id).unwrap().unwrap();
        assert!(!unstarred.favorite);

        assert!(store
            .toggle_favorite(&SnippetId::from("ghost"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn duplicate_copies_content_with_new_identity() {
        let (mut store, _storage) = open_store();
        let original = store.create(input("Original")).unwrap();
        store.toggle_favorite(&original.id).unwrap();
        let original = store.get(&original.id).unwrap().clone();

        let copy = store.duplicate(&original.id).unwrap().unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.snippets()[0].id, copy.id);
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.title, "Original (Copy)");
        assert!(!copy.favorite);
        assert_eq!(copy.created_at, copy.updated_at);
        assert!(copy.created_at >= original.created_at);
        assert_eq!(copy.description, original.description);
        assert_eq!(copy.language, original.language);
        assert_eq!(copy.code, original.code);
        assert_eq!(copy.tags, original.tags);
    }

    #[test]
    fn duplicate_unknown_id_is_noop() {
        let (mut store, storage) = open_store();
        assert!(store.duplicate(&SnippetId::from("none")).unwrap().is_none());
        assert!(store.is_empty());
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn import_prepends_in_given_order() {
        let (mut store, _storage) = open_store();
        let existing = store.create(input("existing")).unwrap();

        let summary = store
            .import(vec![fixed("a", "A"), fixed("b", "B")])
            .unwrap();

        assert_eq!(summary.imported, 2);
        assert!(summary.reassigned.is_empty());
        let ids = store
            .snippets()
            .iter()
            .map(|snippet| snippet.id.as_str().to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string(), existing.id.to_string()]);
        assert_eq!(store.get(&SnippetId::from("a")), Some(&fixed("a", "A")));
    }

    #[test]
    fn import_of_export_into_empty_store_roundtrips() {
        let (mut source, _storage) = open_store();
        source.create(input("one")).unwrap();
        source.create(input("two")).unwrap();
        let first = source.export()[1].id.clone();
        source.toggle_favorite(&first).unwrap();

        let (mut target, _target_storage) = open_store();
        let summary = target.import(source.export()).unwrap();

        assert_eq!(summary.imported, 2);
        assert_eq!(target.export(), source.export());
    }

    #[test]
    fn import_reassigns_colliding_ids() {
        let (mut store, _storage) = open_store();
        store.import(vec![fixed("1", "Existing")]).unwrap();

        let summary = store
            .import(vec![fixed("1", "Clash"), fixed("2", "Fresh"), fixed("2", "Twin")])
            .unwrap();

        assert_eq!(summary.imported, 3);
        assert_eq!(summary.reassigned.len(), 2);
        assert_eq!(summary.reassigned[0].original, SnippetId::from("1"));
        assert_eq!(summary.reassigned[1].original, SnippetId::from("2"));

        let mut ids = store
            .snippets()
            .iter()
            .map(|snippet| snippet.id.clone())
            .collect::<Vec<_>>();
        assert_eq!(ids.len(), 4);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert_eq!(store.snippets()[1].id, SnippetId::from("2"));
    }

    #[test]
    fn import_json_rejects_wholesale() {
        let (mut store, storage) = open_store();
        store.create(input("untouched")).unwrap();
        let before = store.export();

        let payload = r#"[
            {"id": "1", "title": "ok", "language": "go", "code": "x"},
            {"id": "2", "title": "missing code", "language": "go"}
        ]"#;
        let error = store.import_json(payload).unwrap_err();

        assert!(matches!(error, Error::Import(_)));
        assert!(error.to_string().contains("missing required fields"));
        assert_eq!(store.export(), before);
        assert_eq!(storage.save_count(), 1);
    }

    #[test]
    fn failed_save_keeps_previous_list() {
        let (mut store, storage) = open_store();
        store.create(input("persisted")).unwrap();
        let before = store.export();

        storage.fail_saves(true);
        assert!(store.create(input("lost")).is_err());
        assert!(store.delete(&before[0].id).is_err());

        assert_eq!(store.export(), before);
    }

    #[test]
    fn state_survives_reopen() {
        let (mut store, storage) = open_store();
        let created = store.create(input("durable")).unwrap();
        drop(store);

        let reopened = SnippetStore::open(storage, &StoreConfig::default()).unwrap();
        assert_eq!(reopened.snippets(), &[created]);
    }

    #[test]
    fn open_path_persists_to_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.db");
        let config = StoreConfig::default();

        let created = {
            let mut store = SnippetStore::open_path(&path, &config).unwrap();
            store.create(input("on disk")).unwrap()
        };

        let reopened = SnippetStore::open_path(&path, &config).unwrap();
        assert_eq!(reopened.get(&created.id), Some(&created));
    }

    #[test]
    fn open_repairs_duplicate_ids_from_storage() {
        let storage = MemoryStorage::new();
        {
            let mut writer = storage.clone();
            writer
                .save(&PersistedState::new(vec![fixed("1", "A"), fixed("1", "B")]))
                .unwrap();
        }

        let first = SnippetStore::open(storage.clone(), &StoreConfig::default()).unwrap();
        assert_eq!(first.snippets()[0].id, SnippetId::from("1"));
        assert_ne!(first.snippets()[1].id, SnippetId::from("1"));
        assert_eq!(storage.save_count(), 2);

        let second = SnippetStore::open(storage.clone(), &StoreConfig::default()).unwrap();
        assert_eq!(second.snippets(), first.snippets());
        assert_eq!(storage.save_count(), 2);
    }

    #[test]
    fn legacy_envelope_is_upgraded_on_first_save() {
        let storage = MemoryStorage::with_raw(
            r#"{"state":{"snippets":[{"id":"1","title":"Old","language":"sql","code":"SELECT 1","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}]}}"#,
        );

        let mut store = SnippetStore::open(storage.clone(), &StoreConfig::default()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.snippets()[0].title, "Old");
        assert_eq!(storage.save_count(), 0);

        store.toggle_favorite(&SnippetId::from("1")).unwrap();
        let raw = storage.raw().unwrap();
        assert!(raw.starts_with(r#"{"version":1,"#));
        assert!(raw.contains(r#""favorite":true"#));
    }

    #[test]
    fn subscribers_receive_snapshots_until_unsubscribed() {
        let (mut store, _storage) = open_store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let subscription = store.subscribe(move |snippets| {
            sink.borrow_mut().push(snippets.len());
        });

        let created = store.create(input("one")).unwrap();
        store.duplicate(&created.id).unwrap();
        store.delete(&SnippetId::from("unknown")).unwrap();
        assert_eq!(*seen.borrow(), vec![1, 2]);

        assert!(store.unsubscribe(subscription));
        assert!(!store.unsubscribe(subscription));
        store.delete(&created.id).unwrap();
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}
