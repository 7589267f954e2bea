// component.rs - Process-wide component type registry
//
// Components are identified by u32 ids handed out on first use of a type.
// Ids are stable for the life of the process, not across runs.

use once_cell::sync::Lazy;
use std::any::TypeId;
use std::collections::HashMap;
use std::mem::{align_of, size_of};
use std::sync::{PoisonError, RwLock};

pub type ComponentId = u32;

/// Metadata recorded when a component type is first seen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentMeta {
    pub id: ComponentId,
    pub name: &'static str,
    pub size: usize,
    pub align: usize,
}

#[derive(Default)]
struct Registry {
    by_type: HashMap<TypeId, ComponentId>,
    metas: Vec<ComponentMeta>,
}

/// Global registry shared by every world in the process.
static REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::default()));

/// Trait for types stored as dynamic or static components.
///
/// Use [`define_component!`](crate::define_component) rather than
/// implementing this by hand.
pub trait Component: 'static + Sized {
    /// Human-readable name for logs and errors.
    const NAME: &'static str;

    /// Registry id for this type. Does not need an instance.
    #[inline]
    fn id() -> ComponentId {
        component_id::<Self>()
    }
}

/// Resolve (registering on first use) the id for `T`.
pub fn component_id<T: Component>() -> ComponentId {
    let key = TypeId::of::<T>();
    {
        let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(&id) = registry.by_type.get(&key) {
            return id;
        }
    }

    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    // Another thread may have won the race between the two locks.
    if let Some(&id) = registry.by_type.get(&key) {
        return id;
    }
    let id = registry.metas.len() as ComponentId + 1;
    registry.metas.push(ComponentMeta {
        id,
        name: T::NAME,
        size: size_of::<T>(),
        align: align_of::<T>(),
    });
    registry.by_type.insert(key, id);
    id
}

/// Look up component metadata by id.
pub fn meta_of(id: ComponentId) -> Option<ComponentMeta> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    let index = (id as usize).checked_sub(1)?;
    registry.metas.get(index).cloned()
}

/// Implement [`Component`] for a type.
///
/// # Example
/// ```ignore
/// #[derive(Debug, Default, PartialEq)]
/// struct Health { value: i32 }
///
/// define_component!(Health);
/// define_component!(Armor, "ArmorPlating");
/// ```
#[macro_export]
macro_rules! define_component {
    ($ty:ty) => {
        $crate::define_component!($ty, stringify!($ty));
    };
    ($ty:ty, $name:expr) => {
        impl $crate::ecs::Component for $ty {
            const NAME: &'static str = $name;
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha(#[allow(dead_code)] u8);
    define_component!(Alpha);

    struct Beta {
        _x: u64,
    }
    define_component!(Beta, "BetaRenamed");

    #[test]
    fn ids_are_distinct_and_stable() {
        let a = component_id::<Alpha>();
        let b = component_id::<Beta>();
        assert_ne!(a, b);
        assert_eq!(a, component_id::<Alpha>());
        assert_eq!(b, Beta::id());
    }

    #[test]
    fn metadata_is_recorded() {
        let meta = meta_of(component_id::<Beta>()).unwrap();
        assert_eq!(meta.name, "BetaRenamed");
        assert_eq!(meta.size, size_of::<Beta>());
        assert_eq!(meta.align, align_of::<Beta>());
        assert!(meta_of(0).is_none());
    }
}
