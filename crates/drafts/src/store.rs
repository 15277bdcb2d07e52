//! The keyed draft collection.
//!
//! All drafts live in one JSON document under the fixed key [`DRAFTS_KEY`],
//! mapping draft id to draft. Every mutation is a full read-modify-write of
//! that document; the collection is the sole source of truth for "list all
//! in-progress drafts".

use crate::storage::KeyValueStorage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Fixed storage key for the whole draft collection.
pub const DRAFTS_KEY: &str = "nursia:drafts";

/// First step of the assessment wizard.
pub const MIN_STEP: u8 = 1;
/// Last step of the assessment wizard.
pub const MAX_STEP: u8 = 5;

/// One in-progress, not-yet-submitted record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Opaque unique identifier, allocated at creation time.
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every persisted write; never moves backwards.
    pub updated_at: DateTime<Utc>,
    /// Current wizard position, always within `MIN_STEP..=MAX_STEP`.
    pub step: u8,
    /// Flat form field map (superset of all five wizard sections).
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Keyed draft collection over a storage backend.
///
/// All operations are fail-soft: a corrupted or unreadable document behaves
/// like an empty collection, and write failures are logged rather than
/// propagated. The caller never sees an error.
#[derive(Clone, Debug)]
pub struct DraftStore<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> DraftStore<S> {
    /// Creates a store over `storage` using the standard collection key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DRAFTS_KEY)
    }

    /// Creates a store under a non-standard collection key.
    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    /// The underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Allocates and persists a new draft at step 1 with the given initial
    /// field data, returning its id.
    pub fn create_draft(&self, initial: Map<String, Value>) -> String {
        let id = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let draft = Draft {
            id: id.clone(),
            created_at: now,
            updated_at: now,
            step: MIN_STEP,
            data: initial,
        };

        let mut all = self.read_all();
        all.insert(id.clone(), draft);
        self.write_all(&all);
        tracing::debug!(draft_id = %id, "created draft");
        id
    }

    /// Returns the draft for `id`, or `None` when absent.
    pub fn get_draft(&self, id: &str) -> Option<Draft> {
        self.read_all().remove(id)
    }

    /// All drafts, most recently updated first.
    pub fn list_drafts(&self) -> Vec<Draft> {
        let mut drafts: Vec<Draft> = self.read_all().into_values().collect();
        drafts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        drafts
    }

    /// Removes the draft for `id`; a no-op when absent.
    pub fn delete_draft(&self, id: &str) {
        let mut all = self.read_all();
        if all.remove(id).is_some() {
            self.write_all(&all);
            tracing::debug!(draft_id = %id, "deleted draft");
        }
    }

    /// Inserts or replaces a draft wholesale (the autosave commit path).
    pub fn put_draft(&self, draft: &Draft) {
        let mut all = self.read_all();
        all.insert(draft.id.clone(), draft.clone());
        self.write_all(&all);
    }

    fn read_all(&self) -> BTreeMap<String, Draft> {
        match self.storage.get(&self.key) {
            Ok(Some(document)) => match serde_json::from_str(&document) {
                Ok(all) => all,
                Err(err) => {
                    tracing::warn!("draft document is corrupt, treating as empty: {err}");
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(err) => {
                tracing::warn!("draft storage unreadable, treating as empty: {err}");
                BTreeMap::new()
            }
        }
    }

    fn write_all(&self, all: &BTreeMap<String, Draft>) {
        match serde_json::to_string(all) {
            Ok(document) => {
                if let Err(err) = self.storage.set(&self.key, &document) {
                    tracing::warn!("failed to persist draft document: {err}");
                }
            }
            Err(err) => {
                tracing::warn!("failed to serialise draft document: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use chrono::TimeZone;
    use serde_json::json;

    fn field_map(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn creates_and_reads_back_a_draft() {
        let store = DraftStore::new(MemoryStorage::new());
        let id = store.create_draft(field_map(&[("nome", json!("Ana"))]));

        let draft = store.get_draft(&id).expect("draft");
        assert_eq!(draft.id, id);
        assert_eq!(draft.step, MIN_STEP);
        assert_eq!(draft.data["nome"], "Ana");
        assert_eq!(draft.created_at, draft.updated_at);
    }

    #[test]
    fn missing_draft_is_none() {
        let store = DraftStore::new(MemoryStorage::new());
        assert!(store.get_draft("does-not-exist").is_none());
    }

    #[test]
    fn generated_ids_are_unique() {
        let store = DraftStore::new(MemoryStorage::new());
        let a = store.create_draft(Map::new());
        let b = store.create_draft(Map::new());
        assert_ne!(a, b);
        assert_eq!(store.list_drafts().len(), 2);
    }

    #[test]
    fn lists_drafts_most_recent_first() {
        let store = DraftStore::new(MemoryStorage::new());
        for (id, updated) in [
            ("a", "2024-01-01T00:00:00Z"),
            ("b", "2024-01-03T00:00:00Z"),
            ("c", "2024-01-02T00:00:00Z"),
        ] {
            let at: DateTime<Utc> = updated.parse().expect("timestamp");
            store.put_draft(&Draft {
                id: id.to_string(),
                created_at: at,
                updated_at: at,
                step: MIN_STEP,
                data: Map::new(),
            });
        }

        let order: Vec<String> = store.list_drafts().into_iter().map(|d| d.id).collect();
        assert_eq!(order, ["b", "c", "a"]);
    }

    #[test]
    fn delete_is_a_no_op_for_absent_ids() {
        let store = DraftStore::new(MemoryStorage::new());
        let id = store.create_draft(Map::new());
        store.delete_draft("absent");
        assert!(store.get_draft(&id).is_some());

        store.delete_draft(&id);
        assert!(store.get_draft(&id).is_none());
        store.delete_draft(&id);
    }

    #[test]
    fn corrupt_document_degrades_to_empty_collection() {
        let storage = MemoryStorage::new();
        storage.set(DRAFTS_KEY, "{not valid json").expect("seed");

        let store = DraftStore::new(storage);
        assert!(store.list_drafts().is_empty());
        assert!(store.get_draft("anything").is_none());

        // creating through the corrupt document still works
        let id = store.create_draft(Map::new());
        assert!(store.get_draft(&id).is_some());
    }

    #[test]
    fn survives_a_reload_through_file_storage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let id = {
            let store =
                DraftStore::new(FileStorage::new(dir.path()).expect("storage"));
            store.create_draft(field_map(&[("nome", json!("Ana"))]))
        };

        // a fresh store over the same directory sees the draft
        let store = DraftStore::new(FileStorage::new(dir.path()).expect("storage"));
        let draft = store.get_draft(&id).expect("draft");
        assert_eq!(draft.data["nome"], "Ana");
    }

    #[test]
    fn garbage_file_fails_soft() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path()).expect("storage");
        storage.set(DRAFTS_KEY, "\u{1}binary junk").expect("seed");

        let store = DraftStore::new(storage);
        assert!(store.list_drafts().is_empty());
    }

    #[test]
    fn put_draft_replaces_existing_entry() {
        let store = DraftStore::new(MemoryStorage::new());
        let id = store.create_draft(Map::new());

        let mut draft = store.get_draft(&id).expect("draft");
        draft.step = 3;
        draft.updated_at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        store.put_draft(&draft);

        let reread = store.get_draft(&id).expect("draft");
        assert_eq!(reread.step, 3);
        assert_eq!(reread.updated_at, draft.updated_at);
        assert_eq!(store.list_drafts().len(), 1);
    }
}
