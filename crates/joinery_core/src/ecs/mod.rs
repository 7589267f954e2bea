//! Entity Component System core types.
//!
//! Entities are bare 64-bit ids. Each component type owns a store of
//! `(EntityId, T)` records that is sorted by entity id whenever the world is
//! renormalized; static components live in per-type arrays indexed by
//! insertion order. Systems declare a signature of slots and are walked by a
//! merge join across the stores the signature names.

mod component;
mod dispatch;
mod entity;
mod error;
mod macros;
mod signature;
pub mod storage;
mod system;
mod system_descriptor;
mod world;

pub use component::{component_id, meta_of, Component, ComponentId, ComponentMeta};
pub use dispatch::WalkSummary;
pub use entity::{EntityAllocator, EntityId};
pub use error::CoreError;
pub use signature::{
    ComponentGroup, Group, Head, Opt, Read, Signature, Slot, SlotKind, Static,
};
pub use storage::{ComponentStore, Cursor, Removal, StaticStore};
pub use system::{System, SystemFn, SystemItem};
pub use system_descriptor::{SlotInfo, SystemDescriptor};
pub use world::World;
