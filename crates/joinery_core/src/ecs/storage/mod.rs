// mod.rs - Storage module exports and the type-erased store map

mod component_store;
mod cursor;
mod static_store;

pub use component_store::{ComponentStore, Removal};
pub use cursor::Cursor;
pub use static_store::StaticStore;

use crate::ecs::{Component, ComponentId, EntityId};
use std::any::Any;
use std::collections::HashMap;

/// Object-safe view of a `ComponentStore<T>` for world-wide operations.
pub(crate) trait ErasedStore: Any {
    fn len(&self) -> usize;
    fn is_dirty(&self) -> bool;
    fn renormalize(&mut self) -> bool;
    fn remove(&mut self, entity: EntityId, which: Removal);
    fn clear(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStore for ComponentStore<T> {
    fn len(&self) -> usize {
        ComponentStore::len(self)
    }

    fn is_dirty(&self) -> bool {
        ComponentStore::is_dirty(self)
    }

    fn renormalize(&mut self) -> bool {
        ComponentStore::renormalize(self)
    }

    fn remove(&mut self, entity: EntityId, which: Removal) {
        ComponentStore::remove(self, entity, which)
    }

    fn clear(&mut self) {
        ComponentStore::clear(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Object-safe view of a `StaticStore<T>`.
pub(crate) trait ErasedStatic: Any {
    fn count(&self) -> usize;
    fn clear(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStatic for StaticStore<T> {
    fn count(&self) -> usize {
        StaticStore::count(self)
    }

    fn clear(&mut self) {
        StaticStore::clear(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Every store owned by a world, keyed by component id.
///
/// Stores are created lazily on first write. A store is only ever inserted
/// under `T::id()` for its own `T`, so the downcasts below cannot fail for a
/// present entry.
#[derive(Default)]
pub struct Stores {
    dynamic: HashMap<ComponentId, Box<dyn ErasedStore>>,
    statics: HashMap<ComponentId, Box<dyn ErasedStatic>>,
}

impl Stores {
    pub fn component<T: Component>(&self) -> Option<&ComponentStore<T>> {
        self.dynamic
            .get(&T::id())
            .and_then(|store| store.as_any().downcast_ref())
    }

    pub fn component_mut<T: Component>(&mut self) -> Option<&mut ComponentStore<T>> {
        self.dynamic
            .get_mut(&T::id())
            .and_then(|store| store.as_any_mut().downcast_mut())
    }

    pub(crate) fn component_or_insert<T: Component>(
        &mut self,
        capacity: usize,
    ) -> &mut ComponentStore<T> {
        let store = self.dynamic.entry(T::id()).or_insert_with(|| {
            tracing::debug!(component = T::NAME, capacity, "created component store");
            Box::new(ComponentStore::<T>::with_capacity(capacity))
        });
        match store.as_any_mut().downcast_mut() {
            Some(store) => store,
            None => unreachable!("store for `{}` registered under a foreign id", T::NAME),
        }
    }

    pub fn statics<T: Component>(&self) -> Option<&StaticStore<T>> {
        self.statics
            .get(&T::id())
            .and_then(|store| store.as_any().downcast_ref())
    }

    pub fn statics_mut<T: Component>(&mut self) -> Option<&mut StaticStore<T>> {
        self.statics
            .get_mut(&T::id())
            .and_then(|store| store.as_any_mut().downcast_mut())
    }

    pub(crate) fn statics_or_insert<T: Component>(&mut self, capacity: usize) -> &mut StaticStore<T> {
        let store = self.statics.entry(T::id()).or_insert_with(|| {
            tracing::debug!(component = T::NAME, capacity, "created static store");
            Box::new(StaticStore::<T>::with_capacity(capacity))
        });
        match store.as_any_mut().downcast_mut() {
            Some(store) => store,
            None => unreachable!("static store for `{}` registered under a foreign id", T::NAME),
        }
    }

    /// Renormalize every dirty store. Returns how many were sorted.
    pub(crate) fn renormalize(&mut self) -> usize {
        self.dynamic
            .values_mut()
            .map(|store| store.renormalize())
            .filter(|sorted| *sorted)
            .count()
    }

    pub(crate) fn is_normalized(&self) -> bool {
        self.dynamic.values().all(|store| !store.is_dirty())
    }

    pub(crate) fn remove_entity(&mut self, entity: EntityId) {
        for store in self.dynamic.values_mut() {
            if store.len() > 0 {
                store.remove(entity, Removal::All);
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        for store in self.dynamic.values_mut() {
            store.clear();
        }
        for store in self.statics.values_mut() {
            store.clear();
        }
    }

    pub(crate) fn static_count(&self, id: ComponentId) -> usize {
        self.statics.get(&id).map_or(0, |store| store.count())
    }
}
