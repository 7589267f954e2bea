//! Joinery Core
//!
//! A sorted-store Entity Component System:
//! - Per-type component arrays kept sorted by entity id
//! - Static (global) components fanned out into every matched call
//! - Systems dispatched by a k-way merge join over their signature

pub mod config;
pub mod ecs;

pub use config::WorldConfig;
pub use ecs::{
    component_id, Component, ComponentGroup, CoreError, EntityId, Group, Opt, Read, Removal,
    Static, System, SystemFn, SystemItem, WalkSummary, World,
};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
