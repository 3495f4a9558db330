//! In-memory record store.
//!
//! # Invariants
//! - `select_all` yields records in insertion order.
//! - Every stored record has passed `Record::validate()`.

use crate::model::record::{Patch, Record, RecordId};
use crate::model::timestamp::now_utc;
use crate::repo::store::{RecordStore, RepoError, RepoResult};
use std::collections::HashMap;

/// Map-backed store owned by its caller.
#[derive(Debug, Clone)]
pub struct MemoryStore<R> {
    records: HashMap<RecordId, R>,
    order: Vec<RecordId>,
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<R: Record> RecordStore<R> for MemoryStore<R> {
    fn insert(&mut self, record: R) -> RepoResult<R> {
        record.validate()?;

        let id = record.id();
        if self.records.contains_key(&id) {
            return Err(RepoError::Conflict {
                resource: R::KIND,
                id,
            });
        }

        self.records.insert(id, record.clone());
        self.order.push(id);
        Ok(record)
    }

    fn select_all(&self, filter: &R::Filter) -> RepoResult<Vec<R>> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.records.get(id))
            .filter(|record| record.matches(filter))
            .cloned()
            .collect())
    }

    fn select_by_key(&self, id: RecordId) -> RepoResult<R> {
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| RepoError::not_found::<R>(id))
    }

    fn update_by_key(&mut self, id: RecordId, patch: &R::Patch) -> RepoResult<R> {
        if patch.is_empty() {
            return Err(RepoError::EmptyUpdate { resource: R::KIND });
        }

        let stored = self
            .records
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found::<R>(id))?;

        let mut merged = stored.clone();
        merged.apply_patch(patch);
        merged.touch(now_utc());
        merged.validate()?;

        *stored = merged.clone();
        Ok(merged)
    }

    fn delete_by_key(&mut self, id: RecordId) -> RepoResult<()> {
        if self.records.remove(&id).is_none() {
            return Err(RepoError::not_found::<R>(id));
        }
        self.order.retain(|key| *key != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::model::category::{Category, CategoryDraft, CategoryFilter, CategoryPatch};
    use crate::model::record::Record;
    use crate::model::timestamp::now_utc;
    use crate::repo::store::{RecordStore, RepoError};
    use uuid::Uuid;

    fn category(name: &str) -> Category {
        Category::from_draft(Uuid::new_v4(), CategoryDraft::new(name), now_utc())
    }

    #[test]
    fn select_all_keeps_insertion_order_after_delete() {
        let mut store: MemoryStore<Category> = MemoryStore::new();
        let first = store.insert(category("Tools")).unwrap();
        let second = store.insert(category("Garden")).unwrap();
        let third = store.insert(category("Kitchen")).unwrap();

        store.delete_by_key(second.category_id).unwrap();

        let ids: Vec<_> = store
            .select_all(&CategoryFilter::default())
            .unwrap()
            .into_iter()
            .map(|record| record.category_id)
            .collect();
        assert_eq!(ids, vec![first.category_id, third.category_id]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn duplicate_key_is_a_conflict() {
        let mut store: MemoryStore<Category> = MemoryStore::new();
        let record = store.insert(category("Tools")).unwrap();

        let err = store.insert(record.clone()).unwrap_err();
        assert!(matches!(err, RepoError::Conflict { id, .. } if id == record.category_id));
    }

    #[test]
    fn failed_validation_leaves_record_untouched() {
        let mut store: MemoryStore<Category> = MemoryStore::new();
        let record = store.insert(category("Tools")).unwrap();

        let err = store
            .update_by_key(
                record.category_id,
                &CategoryPatch {
                    name: Some(String::new()),
                    ..CategoryPatch::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, RepoError::Validation(_)));
        assert_eq!(store.select_by_key(record.category_id).unwrap(), record);
    }
}
