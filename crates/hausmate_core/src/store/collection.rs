//! Generic persisted collection store.
//!
//! # Responsibility
//! - Hold one entity collection in memory, hydrated once at construction.
//! - Assign ids on add and write the whole collection through after
//!   every effective mutation.
//!
//! # Invariants
//! - Ids are store-assigned, unique within the collection, never empty.
//! - `update`/`delete` against an unknown id return `false` and leave
//!   the persisted blob untouched.
//! - Insertion order is preserved; `list` exposes it as-is.

use log::{info, warn};
use uuid::Uuid;

use super::adapter;
use super::medium::StorageMedium;
use crate::model::{Entity, EntityId};

/// CRUD store for one entity collection over one storage medium.
pub struct CollectionStore<T: Entity, M: StorageMedium> {
    medium: M,
    records: Vec<T>,
}

impl<T: Entity, M: StorageMedium> CollectionStore<T, M> {
    /// Builds the store and hydrates it from `medium`. Absent or corrupt
    /// blobs hydrate an empty collection.
    pub fn hydrate(medium: M) -> Self {
        let records: Vec<T> = adapter::load(&medium, T::COLLECTION_KEY, Vec::new());
        info!(
            "event=collection_hydrate module=store status=ok key={} records={}",
            T::COLLECTION_KEY,
            records.len()
        );
        Self { medium, records }
    }

    /// The live collection, insertion-ordered.
    pub fn list(&self) -> &[T] {
        &self.records
    }

    /// Looks up one record by id.
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Materializes `draft` with a fresh id, appends it and persists.
    /// Returns the assigned id.
    pub fn add(&mut self, draft: T::Draft) -> EntityId {
        let id = self.unique_id();
        self.records.push(T::from_draft(id, draft));
        self.persist();
        id
    }

    /// Shallow-merges `patch` into the matching record and persists.
    /// Returns whether a record matched.
    pub fn update(&mut self, id: EntityId, patch: T::Patch) -> bool {
        match self.records.iter_mut().find(|record| record.id() == id) {
            Some(record) => record.apply_patch(patch),
            None => return false,
        }
        self.persist();
        true
    }

    /// Removes the matching record, persisting only when something was
    /// removed. Deleting an absent id is a no-op returning `false`.
    pub fn delete(&mut self, id: EntityId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        if self.records.len() == before {
            return false;
        }
        self.persist();
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn unique_id(&self) -> EntityId {
        loop {
            let candidate = Uuid::new_v4();
            if self.get(candidate).is_none() {
                return candidate;
            }
            // A v4 collision within one household is effectively
            // impossible; treat it as a bug in debug builds.
            debug_assert!(
                false,
                "uuid collision in collection {}",
                T::COLLECTION_KEY
            );
            warn!(
                "event=id_assign module=store status=retry key={} error_code=id_collision",
                T::COLLECTION_KEY
            );
        }
    }

    fn persist(&mut self) {
        adapter::save(&mut self.medium, T::COLLECTION_KEY, &self.records);
    }
}
