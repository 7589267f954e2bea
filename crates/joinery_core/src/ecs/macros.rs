//! Convenience macros for entity spawning

/// Mint an entity id and attach each component to it.
///
/// The touched stores are left dirty; renormalize before walking.
///
/// # Examples
///
/// ```ignore
/// let entity = spawn!(world, Position(Vec3::ZERO));
///
/// let entity = spawn!(world,
///     Position(Vec3::ZERO),
///     Gameplay { health: 100, armor: 5 },
/// );
/// ```
#[macro_export]
macro_rules! spawn {
    ($world:expr, $($component:expr),+ $(,)?) => {{
        let entity = $world.new_entity_id();
        $(
            $world.add_component(entity, $component);
        )+
        entity
    }};
}
