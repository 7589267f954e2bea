// world.rs - ECS World with entity ids, component stores and system walks

use crate::config::WorldConfig;
use crate::ecs::dispatch::{self, WalkSummary};
use crate::ecs::storage::Stores;
use crate::ecs::{
    Component, ComponentStore, CoreError, EntityAllocator, EntityId, Removal, Signature,
    StaticStore, System, SystemDescriptor, SystemFn,
};
use joinery_metrics::WalkProfiler;

/// The main ECS world: an entity id source plus every component and static
/// store.
///
/// Writes (`add_component`, removals) leave the touched stores dirty; call
/// [`renormalize`](Self::renormalize) before walking or looking up.
pub struct World {
    entities: EntityAllocator,
    stores: Stores,
    config: WorldConfig,
    profiler: WalkProfiler,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            entities: EntityAllocator::starting_at(config.first_entity_id),
            stores: Stores::default(),
            config,
            profiler: WalkProfiler::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Mint a fresh entity id. Ids are never reused, even after `clear`.
    pub fn new_entity_id(&mut self) -> EntityId {
        self.entities.allocate()
    }

    /// Attach a component to an entity. The id need not come from
    /// [`new_entity_id`](Self::new_entity_id).
    pub fn add_component<T: Component>(&mut self, entity: EntityId, component: T) {
        self.stores
            .component_or_insert::<T>(self.config.store_capacity)
            .add(entity, component);
    }

    /// Append a static component and return its slot index.
    pub fn add_static_component<T: Component>(&mut self, component: T) -> usize {
        self.stores
            .statics_or_insert::<T>(self.config.static_capacity)
            .add(component)
    }

    /// Sort every dirty store and apply queued removals.
    pub fn renormalize(&mut self) {
        let sorted = self.stores.renormalize();
        if sorted > 0 {
            tracing::debug!(stores = sorted, "world renormalized");
        }
    }

    pub fn is_normalized(&self) -> bool {
        self.stores.is_normalized()
    }

    /// Queue removal of every component of `entity`.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.stores.remove_entity(entity);
    }

    /// Queue removal of some or all `T` records of `entity`.
    pub fn remove_component<T: Component>(&mut self, entity: EntityId, which: Removal) {
        if let Some(store) = self.stores.component_mut::<T>() {
            store.remove(entity, which);
        }
    }

    /// Drop every component record and static value. The entity id counter
    /// keeps counting.
    pub fn clear(&mut self) {
        self.stores.clear();
    }

    /// Run `system` over every matching entity.
    pub fn walk<S: System>(&mut self, system: &mut S) -> Result<WalkSummary, CoreError> {
        let name = system.name().into_owned();
        let stores = &self.stores;
        self.profiler.time_walk(&name, || {
            let result = dispatch::walk(stores, system);
            let invocations = result.as_ref().map_or(0, |summary| summary.invocations);
            (result, invocations)
        })
    }

    /// Run `system` for one entity only. Returns `false` if the entity does
    /// not satisfy the signature.
    pub fn walk_entity<S: System>(
        &mut self,
        entity: EntityId,
        system: &mut S,
    ) -> Result<bool, CoreError> {
        Ok(dispatch::walk_entity(&self.stores, entity, system)?.is_some())
    }

    /// Walk a closure with an explicit signature.
    ///
    /// ```ignore
    /// world.walk_fn::<(Read<Position>, Opt<Velocity>), _>("integrate", |entity, (pos, vel)| {
    ///     Ok(())
    /// })?;
    /// ```
    pub fn walk_fn<Sig, F>(&mut self, name: &str, func: F) -> Result<WalkSummary, CoreError>
    where
        Sig: Signature,
        F: for<'w> FnMut(EntityId, Sig::Item<'w>) -> anyhow::Result<()>,
    {
        let mut system = SystemFn::<Sig, F>::new(name, func);
        self.walk(&mut system)
    }

    /// Descriptor for `system`'s signature.
    pub fn describe<S: System>(&self, system: &S) -> SystemDescriptor {
        SystemDescriptor::new(system.name(), S::Signature::slots())
    }

    /// First `T` record of `entity`.
    pub fn component<T: Component>(&self, entity: EntityId) -> Result<Option<&T>, CoreError> {
        match self.stores.component::<T>() {
            Some(store) => store.get(entity),
            None => Ok(None),
        }
    }

    /// Every `T` record of `entity`, in insertion order.
    pub fn components<T: Component>(&self, entity: EntityId) -> Result<Vec<&T>, CoreError> {
        match self.stores.component::<T>() {
            Some(store) => Ok(store.get_all(entity)?.iter().map(|(_, v)| v).collect()),
            None => Ok(Vec::new()),
        }
    }

    /// Whether `entity` already carries a `T` equal to `value`.
    pub fn has_equal_component<T: Component + PartialEq>(
        &self,
        entity: EntityId,
        value: &T,
    ) -> Result<bool, CoreError> {
        match self.stores.component::<T>() {
            Some(store) => Ok(store.get_all(entity)?.iter().any(|(_, v)| v == value)),
            None => Ok(false),
        }
    }

    /// Number of `T` records, sorted or not.
    pub fn component_count<T: Component>(&self) -> usize {
        self.stores.component::<T>().map_or(0, ComponentStore::len)
    }

    pub fn static_count<T: Component>(&self) -> usize {
        self.stores.static_count(T::id())
    }

    pub fn static_component<T: Component>(&self, index: usize) -> Result<&T, CoreError> {
        self.stores
            .statics::<T>()
            .ok_or(CoreError::IndexOutOfRange {
                component: T::NAME,
                index,
                count: 0,
            })?
            .get(index)
    }

    pub fn static_component_mut<T: Component>(
        &mut self,
        index: usize,
    ) -> Result<&mut T, CoreError> {
        self.stores
            .statics_mut::<T>()
            .ok_or(CoreError::IndexOutOfRange {
                component: T::NAME,
                index,
                count: 0,
            })?
            .get_mut(index)
    }

    /// Direct access to one component store, if it exists.
    pub fn store<T: Component>(&self) -> Option<&ComponentStore<T>> {
        self.stores.component::<T>()
    }

    pub fn static_store<T: Component>(&self) -> Option<&StaticStore<T>> {
        self.stores.statics::<T>()
    }

    /// Walk timings per system name.
    pub fn profiler(&self) -> &WalkProfiler {
        &self.profiler
    }

    pub fn profiler_mut(&mut self) -> &mut WalkProfiler {
        &mut self.profiler
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
