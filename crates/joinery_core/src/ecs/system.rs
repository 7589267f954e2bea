// system.rs - User systems and the closure adapter

use crate::ecs::{EntityId, Signature};
use std::borrow::Cow;
use std::marker::PhantomData;

/// Argument passed to `execute` for a system `S`.
pub type SystemItem<'w, S> = <<S as System>::Signature as Signature>::Item<'w>;

/// User code plus the fixed signature it consumes.
///
/// `execute` is called once per matched entity and static combination, in
/// increasing entity order. References in `item` are only valid for the
/// call. Returning an error aborts the walk.
///
/// # Example
/// ```ignore
/// struct Integrate;
///
/// impl System for Integrate {
///     type Signature = (Read<Velocity>, Opt<Drag>, Static<Gravity>);
///
///     fn execute(&mut self, entity: EntityId, item: SystemItem<'_, Self>) -> anyhow::Result<()> {
///         let (velocity, drag, gravity) = item;
///         // ...
///         Ok(())
///     }
/// }
/// ```
pub trait System {
    type Signature: Signature;

    fn execute(&mut self, entity: EntityId, item: SystemItem<'_, Self>) -> anyhow::Result<()>;

    /// Name used in logs, errors and the walk profiler.
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

/// Runs a closure as a [`System`].
pub struct SystemFn<Sig, F> {
    name: String,
    func: F,
    _signature: PhantomData<fn() -> Sig>,
}

impl<Sig, F> SystemFn<Sig, F>
where
    Sig: Signature,
    F: for<'w> FnMut(EntityId, Sig::Item<'w>) -> anyhow::Result<()>,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            _signature: PhantomData,
        }
    }
}

impl<Sig, F> System for SystemFn<Sig, F>
where
    Sig: Signature,
    F: for<'w> FnMut(EntityId, Sig::Item<'w>) -> anyhow::Result<()>,
{
    type Signature = Sig;

    fn execute(&mut self, entity: EntityId, item: SystemItem<'_, Self>) -> anyhow::Result<()> {
        (self.func)(entity, item)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}
