//! Shared fixture components and world setup for the dispatch suites.
#![allow(dead_code)]

use glam::{Mat4, Vec3, Vec4};
use joinery_core::{define_component, spawn, EntityId, World};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompPosition(pub Vec3);
define_component!(CompPosition);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompHomPos(pub Vec4);
define_component!(CompHomPos);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompGameplay {
    pub health: i32,
    pub armor: i32,
}
define_component!(CompGameplay);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticLightDir(pub Vec3);
define_component!(StaticLightDir);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticCamera(pub Mat4);
define_component!(StaticCamera);

pub fn position(id: EntityId) -> CompPosition {
    CompPosition(Vec3::splat(id as f32))
}

pub fn hom_pos(id: EntityId) -> CompHomPos {
    CompHomPos(Vec4::new(id as f32, 0.0, 0.0, 1.0))
}

pub fn gameplay(id: EntityId) -> CompGameplay {
    CompGameplay {
        health: 100 + id as i32,
        armor: id as i32,
    }
}

/// Four entities:
/// 1 = (pos, hom), 2 = (hom, gp), 3 = (pos, gp), 4 = (pos, hom, gp).
pub fn populate_quad(world: &mut World) -> [EntityId; 4] {
    let a = world.new_entity_id();
    let b = world.new_entity_id();
    let c = world.new_entity_id();

    world.add_component(a, position(a));
    world.add_component(a, hom_pos(a));

    world.add_component(b, hom_pos(b));
    world.add_component(b, gameplay(b));

    world.add_component(c, position(c));
    world.add_component(c, gameplay(c));

    let d = c + 1;
    let spawned = spawn!(world, position(d), hom_pos(d), gameplay(d));
    assert_eq!(spawned, d);
    [a, b, c, d]
}

/// Install a test-writer subscriber so walk logging shows up under
/// `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}
