// signature.rs - Slot markers and tuple signatures
//
// A system's signature is a tuple of slot markers. Each marker knows how to
// open its store for a walk, report its cursor head, and produce the value
// handed to `System::execute` for a matched entity.

use crate::ecs::storage::Stores;
use crate::ecs::{Component, ComponentId, CoreError, Cursor, EntityId, SlotInfo};
use std::marker::PhantomData;
use std::slice;

/// How a slot takes part in matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// Dynamic, must be present. Receives the first record.
    Required,
    /// Dynamic, may be absent.
    Optional,
    /// Drawn from the static store and fanned out.
    Static,
    /// Dynamic, must be present. Receives every record of the entity.
    Group,
}

impl SlotKind {
    #[inline]
    pub fn is_dynamic(self) -> bool {
        !matches!(self, SlotKind::Static)
    }

    #[inline]
    pub fn is_required(self) -> bool {
        matches!(self, SlotKind::Required | SlotKind::Group)
    }
}

/// Cursor head of one slot during a walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Head {
    At(EntityId),
    Exhausted,
    /// Static slots do not take part in the join.
    Static,
}

/// One position in a signature.
pub trait Slot: 'static {
    type Component: Component;
    const KIND: SlotKind;

    /// Per-walk state: a cursor for dynamic slots, the value slice for
    /// static ones.
    type Fetch<'w>;
    type Item<'w>;

    fn fetch<'w>(stores: &'w Stores, system: &str) -> Result<Self::Fetch<'w>, CoreError>;

    fn head(fetch: &Self::Fetch<'_>) -> Head;

    fn seek(fetch: &mut Self::Fetch<'_>, entity: EntityId);

    /// Step past every record of `entity` if it is at the head.
    fn consume(fetch: &mut Self::Fetch<'_>, entity: EntityId);

    /// Number of fan-out values, `None` for dynamic slots.
    fn static_len(fetch: &Self::Fetch<'_>) -> Option<usize>;

    /// Value for `entity`. Static slots take their index from `coords`.
    fn item<'w>(
        fetch: &Self::Fetch<'w>,
        entity: EntityId,
        coords: &mut slice::Iter<'_, usize>,
    ) -> Option<Self::Item<'w>>;

    fn info() -> SlotInfo {
        SlotInfo {
            kind: Self::KIND,
            component: Self::Component::id(),
            name: Self::Component::NAME,
        }
    }
}

/// Required dynamic component, passed as `&T`.
pub struct Read<T>(PhantomData<fn() -> T>);

/// Optional dynamic component, passed as `Option<&T>`.
pub struct Opt<T>(PhantomData<fn() -> T>);

/// Static component, passed as `&T` once per stored value.
pub struct Static<T>(PhantomData<fn() -> T>);

/// Required dynamic component, passed as every record of the entity.
pub struct Group<T>(PhantomData<fn() -> T>);

fn open_cursor<T: Component>(stores: &Stores) -> Result<Cursor<'_, T>, CoreError> {
    match stores.component::<T>() {
        Some(store) => store.cursor(),
        None => Ok(Cursor::empty()),
    }
}

fn cursor_head<T>(cursor: &Cursor<'_, T>) -> Head {
    cursor.peek_entity().map_or(Head::Exhausted, Head::At)
}

impl<T: Component> Slot for Read<T> {
    type Component = T;
    const KIND: SlotKind = SlotKind::Required;
    type Fetch<'w> = Cursor<'w, T>;
    type Item<'w> = &'w T;

    fn fetch<'w>(stores: &'w Stores, _system: &str) -> Result<Cursor<'w, T>, CoreError> {
        open_cursor(stores)
    }

    fn head(fetch: &Cursor<'_, T>) -> Head {
        cursor_head(fetch)
    }

    fn seek(fetch: &mut Cursor<'_, T>, entity: EntityId) {
        fetch.seek(entity);
    }

    fn consume(fetch: &mut Cursor<'_, T>, entity: EntityId) {
        fetch.skip_entity(entity);
    }

    fn static_len(_fetch: &Cursor<'_, T>) -> Option<usize> {
        None
    }

    fn item<'w>(
        fetch: &Self::Fetch<'w>,
        entity: EntityId,
        _coords: &mut slice::Iter<'_, usize>,
    ) -> Option<Self::Item<'w>> {
        match fetch.current() {
            Some((e, value)) if e == entity => Some(value),
            _ => None,
        }
    }
}

impl<T: Component> Slot for Opt<T> {
    type Component = T;
    const KIND: SlotKind = SlotKind::Optional;
    type Fetch<'w> = Cursor<'w, T>;
    type Item<'w> = Option<&'w T>;

    fn fetch<'w>(stores: &'w Stores, _system: &str) -> Result<Cursor<'w, T>, CoreError> {
        open_cursor(stores)
    }

    fn head(fetch: &Cursor<'_, T>) -> Head {
        cursor_head(fetch)
    }

    fn seek(fetch: &mut Cursor<'_, T>, entity: EntityId) {
        fetch.seek(entity);
    }

    fn consume(fetch: &mut Cursor<'_, T>, entity: EntityId) {
        fetch.skip_entity(entity);
    }

    fn static_len(_fetch: &Cursor<'_, T>) -> Option<usize> {
        None
    }

    fn item<'w>(
        fetch: &Self::Fetch<'w>,
        entity: EntityId,
        _coords: &mut slice::Iter<'_, usize>,
    ) -> Option<Self::Item<'w>> {
        Some(match fetch.current() {
            Some((e, value)) if e == entity => Some(value),
            _ => None,
        })
    }
}

impl<T: Component> Slot for Static<T> {
    type Component = T;
    const KIND: SlotKind = SlotKind::Static;
    type Fetch<'w> = &'w [T];
    type Item<'w> = &'w T;

    fn fetch<'w>(stores: &'w Stores, system: &str) -> Result<&'w [T], CoreError> {
        match stores.statics::<T>() {
            Some(store) if store.count() > 0 => Ok(store.as_slice()),
            _ => Err(CoreError::precondition(
                system,
                format!("static component `{}` has no values", T::NAME),
            )),
        }
    }

    fn head(_fetch: &&[T]) -> Head {
        Head::Static
    }

    fn seek(_fetch: &mut &[T], _entity: EntityId) {}

    fn consume(_fetch: &mut &[T], _entity: EntityId) {}

    fn static_len(fetch: &&[T]) -> Option<usize> {
        Some(fetch.len())
    }

    fn item<'w>(
        fetch: &Self::Fetch<'w>,
        _entity: EntityId,
        coords: &mut slice::Iter<'_, usize>,
    ) -> Option<Self::Item<'w>> {
        let values: &'w [T] = *fetch;
        values.get(*coords.next()?)
    }
}

/// Every record of one component type carried by a matched entity, in
/// insertion order. Never empty.
#[derive(Debug)]
pub struct ComponentGroup<'w, T> {
    records: &'w [(EntityId, T)],
}

impl<'w, T> ComponentGroup<'w, T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The earliest-inserted record.
    pub fn first(&self) -> Option<&'w T> {
        let records: &'w [(EntityId, T)] = self.records;
        records.first().map(|(_, value)| value)
    }

    pub fn get(&self, index: usize) -> Option<&'w T> {
        let records: &'w [(EntityId, T)] = self.records;
        records.get(index).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'w T> + 'w {
        let records: &'w [(EntityId, T)] = self.records;
        records.iter().map(|(_, value)| value)
    }
}

impl<T> Clone for ComponentGroup<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ComponentGroup<'_, T> {}

impl<T: Component> Slot for Group<T> {
    type Component = T;
    const KIND: SlotKind = SlotKind::Group;
    type Fetch<'w> = Cursor<'w, T>;
    type Item<'w> = ComponentGroup<'w, T>;

    fn fetch<'w>(stores: &'w Stores, _system: &str) -> Result<Cursor<'w, T>, CoreError> {
        open_cursor(stores)
    }

    fn head(fetch: &Cursor<'_, T>) -> Head {
        cursor_head(fetch)
    }

    fn seek(fetch: &mut Cursor<'_, T>, entity: EntityId) {
        fetch.seek(entity);
    }

    fn consume(fetch: &mut Cursor<'_, T>, entity: EntityId) {
        fetch.skip_entity(entity);
    }

    fn static_len(_fetch: &Cursor<'_, T>) -> Option<usize> {
        None
    }

    fn item<'w>(
        fetch: &Self::Fetch<'w>,
        entity: EntityId,
        _coords: &mut slice::Iter<'_, usize>,
    ) -> Option<Self::Item<'w>> {
        if fetch.peek_entity() != Some(entity) {
            return None;
        }
        Some(ComponentGroup {
            records: fetch.run(),
        })
    }
}

/// An ordered list of slots, implemented for tuples of one to ten slots.
pub trait Signature: 'static {
    type Fetch<'w>;
    type Item<'w>;

    fn slots() -> Vec<SlotInfo>;

    fn fetch<'w>(stores: &'w Stores, system: &str) -> Result<Self::Fetch<'w>, CoreError>;

    /// Push each slot's head, in slot order.
    fn heads(fetch: &Self::Fetch<'_>, out: &mut Vec<Head>);

    /// Move every dynamic cursor to the first record not below `entity`.
    fn seek(fetch: &mut Self::Fetch<'_>, entity: EntityId);

    fn consume(fetch: &mut Self::Fetch<'_>, entity: EntityId);

    /// Push the value count of each static slot, in slot order.
    fn static_lens(fetch: &Self::Fetch<'_>, out: &mut Vec<usize>);

    /// Build the execute argument for `entity`. `coords` holds one index per
    /// static slot. `None` if a required slot is not at `entity`.
    fn item<'w>(fetch: &Self::Fetch<'w>, entity: EntityId, coords: &[usize])
        -> Option<Self::Item<'w>>;

    fn component_ids() -> Vec<ComponentId> {
        Self::slots().into_iter().map(|slot| slot.component).collect()
    }
}

macro_rules! impl_signature {
    ($($S:ident $s:ident),+) => {
        impl<$($S: Slot),+> Signature for ($($S,)+) {
            type Fetch<'w> = ($($S::Fetch<'w>,)+);
            type Item<'w> = ($($S::Item<'w>,)+);

            fn slots() -> Vec<SlotInfo> {
                vec![$($S::info()),+]
            }

            fn fetch<'w>(stores: &'w Stores, system: &str) -> Result<Self::Fetch<'w>, CoreError> {
                Ok(($($S::fetch(stores, system)?,)+))
            }

            fn heads(fetch: &Self::Fetch<'_>, out: &mut Vec<Head>) {
                let ($($s,)+) = fetch;
                $(out.push($S::head($s));)+
            }

            fn seek(fetch: &mut Self::Fetch<'_>, entity: EntityId) {
                let ($($s,)+) = fetch;
                $($S::seek($s, entity);)+
            }

            fn consume(fetch: &mut Self::Fetch<'_>, entity: EntityId) {
                let ($($s,)+) = fetch;
                $($S::consume($s, entity);)+
            }

            fn static_lens(fetch: &Self::Fetch<'_>, out: &mut Vec<usize>) {
                let ($($s,)+) = fetch;
                $(out.extend($S::static_len($s));)+
            }

            fn item<'w>(
                fetch: &Self::Fetch<'w>,
                entity: EntityId,
                coords: &[usize],
            ) -> Option<Self::Item<'w>> {
                let mut coords = coords.iter();
                let ($($s,)+) = fetch;
                Some(($($S::item($s, entity, &mut coords)?,)+))
            }
        }
    };
}

impl_signature!(A a);
impl_signature!(A a, B b);
impl_signature!(A a, B b, C c);
impl_signature!(A a, B b, C c, D d);
impl_signature!(A a, B b, C c, D d, E e);
impl_signature!(A a, B b, C c, D d, E e, F f);
impl_signature!(A a, B b, C c, D d, E e, F f, G g);
impl_signature!(A a, B b, C c, D d, E e, F f, G g, H h);
impl_signature!(A a, B b, C c, D d, E e, F f, G g, H h, I i);
impl_signature!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j);
