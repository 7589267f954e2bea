// component_store.rs - Entity-sorted record array for one component type
//
// Records are appended unsorted and become queryable after renormalize,
// which stable-sorts by entity id and then applies queued removals.

use crate::ecs::{Component, CoreError, Cursor, EntityId};

/// Which records of an entity a queued removal drops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// Every record of the entity.
    All,
    /// The earliest-inserted record of the entity.
    First,
    /// The latest-inserted record of the entity.
    Last,
}

/// Dense `(EntityId, T)` storage for a single component type.
///
/// Several records may share an entity id; after renormalize they are
/// adjacent and in insertion order.
pub struct ComponentStore<T> {
    records: Vec<(EntityId, T)>,
    removals: Vec<(EntityId, Removal)>,
    appended: bool,
}

impl<T: Component> ComponentStore<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            removals: Vec::new(),
            appended: false,
        }
    }

    /// Append a record. Not visible to cursors until renormalize.
    #[inline]
    pub fn add(&mut self, entity: EntityId, value: T) {
        self.records.push((entity, value));
        self.appended = true;
    }

    /// Queue a removal, applied at the next renormalize.
    pub fn remove(&mut self, entity: EntityId, which: Removal) {
        self.removals.push((entity, which));
    }

    pub fn remove_entity(&mut self, entity: EntityId) {
        self.remove(entity, Removal::All);
    }

    pub fn remove_first(&mut self, entity: EntityId) {
        self.remove(entity, Removal::First);
    }

    pub fn remove_last(&mut self, entity: EntityId) {
        self.remove(entity, Removal::Last);
    }

    /// Drop every record and every queued removal immediately.
    pub fn clear(&mut self) {
        self.records.clear();
        self.removals.clear();
        self.appended = false;
    }

    /// True if records were appended or removals queued since the last
    /// renormalize.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.appended || !self.removals.is_empty()
    }

    /// Number of records, including ones not yet sorted in.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stable-sort pending records by entity id, then apply queued removals
    /// in the order they were requested. Returns `false` when there was
    /// nothing to do.
    pub fn renormalize(&mut self) -> bool {
        if !self.is_dirty() {
            return false;
        }

        if self.appended {
            // `sort_by_key` is a stable merge sort.
            self.records.sort_by_key(|(entity, _)| *entity);
            self.appended = false;
        }

        let removals = std::mem::take(&mut self.removals);
        let before = self.records.len();
        for (entity, which) in &removals {
            let lo = self.records.partition_point(|(e, _)| e < entity);
            let hi = self.records.partition_point(|(e, _)| e <= entity);
            if lo == hi {
                continue;
            }
            match which {
                Removal::All => {
                    self.records.drain(lo..hi);
                }
                Removal::First => {
                    self.records.remove(lo);
                }
                Removal::Last => {
                    self.records.remove(hi - 1);
                }
            }
        }

        tracing::debug!(
            component = T::NAME,
            records = self.records.len(),
            removed = before - self.records.len(),
            "renormalized component store"
        );
        true
    }

    /// Cursor over the sorted records.
    pub fn cursor(&self) -> Result<Cursor<'_, T>, CoreError> {
        Ok(Cursor::new(self.records()?))
    }

    /// The sorted record slice.
    pub fn records(&self) -> Result<&[(EntityId, T)], CoreError> {
        if self.is_dirty() {
            return Err(CoreError::StoreNotNormalized { component: T::NAME });
        }
        Ok(&self.records)
    }

    /// Every record of `entity`, in insertion order.
    pub fn get_all(&self, entity: EntityId) -> Result<&[(EntityId, T)], CoreError> {
        let records = self.records()?;
        let lo = records.partition_point(|(e, _)| *e < entity);
        let hi = records.partition_point(|(e, _)| *e <= entity);
        Ok(&records[lo..hi])
    }

    /// The earliest-inserted record of `entity`, if any.
    pub fn get(&self, entity: EntityId) -> Result<Option<&T>, CoreError> {
        Ok(self.get_all(entity)?.first().map(|(_, value)| value))
    }
}

impl<T: Component> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::define_component;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Tag(u32);
    define_component!(Tag);

    fn values(store: &ComponentStore<Tag>) -> Vec<(EntityId, u32)> {
        store
            .cursor()
            .unwrap()
            .map(|(e, t)| (e, t.0))
            .collect()
    }

    #[test]
    fn renormalize_sorts_stably() {
        let mut store = ComponentStore::new();
        store.add(5, Tag(50));
        store.add(2, Tag(20));
        store.add(5, Tag(51));
        store.add(1, Tag(10));
        store.add(2, Tag(21));

        assert!(store.is_dirty());
        assert!(store.renormalize());
        assert!(!store.is_dirty());
        assert_eq!(
            values(&store),
            vec![(1, 10), (2, 20), (2, 21), (5, 50), (5, 51)]
        );
    }

    #[test]
    fn renormalize_is_idempotent() {
        let mut store = ComponentStore::new();
        store.add(3, Tag(1));
        store.add(1, Tag(2));
        assert!(store.renormalize());
        let first = values(&store);
        assert!(!store.renormalize());
        assert_eq!(values(&store), first);
    }

    #[test]
    fn cursor_refuses_dirty_store() {
        let mut store = ComponentStore::new();
        store.add(1, Tag(1));
        assert!(matches!(
            store.cursor(),
            Err(CoreError::StoreNotNormalized { component: "Tag" })
        ));
    }

    #[test]
    fn empty_store_is_clean() {
        let store = ComponentStore::<Tag>::new();
        assert!(!store.is_dirty());
        assert_eq!(store.cursor().unwrap().count(), 0);
    }

    #[test]
    fn removals_apply_after_sort() {
        let mut store = ComponentStore::new();
        for (e, v) in [(4, 40), (2, 20), (4, 41), (2, 21), (4, 42), (9, 90)] {
            store.add(e, Tag(v));
        }
        store.remove_first(4);
        store.remove_last(2);
        store.remove_entity(9);
        store.remove(100, Removal::All);
        store.renormalize();

        assert_eq!(values(&store), vec![(2, 20), (4, 41), (4, 42)]);
    }

    #[test]
    fn queued_removal_marks_dirty() {
        let mut store = ComponentStore::new();
        store.add(1, Tag(1));
        store.renormalize();
        store.remove(1, Removal::All);
        assert!(store.is_dirty());
        assert!(store.cursor().is_err());
        store.renormalize();
        assert!(store.is_empty());
    }

    #[test]
    fn lookups_use_insertion_order() {
        let mut store = ComponentStore::new();
        store.add(7, Tag(1));
        store.add(3, Tag(2));
        store.add(7, Tag(3));
        store.renormalize();

        assert_eq!(store.get(7).unwrap(), Some(&Tag(1)));
        assert_eq!(store.get(8).unwrap(), None);
        let all: Vec<u32> = store.get_all(7).unwrap().iter().map(|(_, t)| t.0).collect();
        assert_eq!(all, vec![1, 3]);
    }
}
