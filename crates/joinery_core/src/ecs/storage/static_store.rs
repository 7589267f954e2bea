// static_store.rs - Append-only array of global component values

use crate::ecs::{Component, CoreError};

/// Values of one static component type, indexed by insertion order.
///
/// Slots are never removed individually, so an index handed out by
/// [`add`](Self::add) stays valid for the life of the store.
pub struct StaticStore<T> {
    values: Vec<T>,
}

impl<T: Component> StaticStore<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append a value and return its slot index (the previous count).
    pub fn add(&mut self, value: T) -> usize {
        let index = self.values.len();
        self.values.push(value);
        index
    }

    pub fn get(&self, index: usize) -> Result<&T, CoreError> {
        let count = self.values.len();
        self.values.get(index).ok_or(CoreError::IndexOutOfRange {
            component: T::NAME,
            index,
            count,
        })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, CoreError> {
        let count = self.values.len();
        self.values.get_mut(index).ok_or(CoreError::IndexOutOfRange {
            component: T::NAME,
            index,
            count,
        })
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<T: Component> Default for StaticStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::define_component;

    #[derive(Debug, PartialEq)]
    struct Camera(&'static str);
    define_component!(Camera);

    #[test]
    fn add_returns_previous_count() {
        let mut store = StaticStore::new();
        assert_eq!(store.add(Camera("main")), 0);
        assert_eq!(store.add(Camera("minimap")), 1);
        assert_eq!(store.count(), 2);
        assert_eq!(store.get(1).unwrap(), &Camera("minimap"));
    }

    #[test]
    fn out_of_range_reports_count() {
        let mut store = StaticStore::new();
        store.add(Camera("main"));
        let err = store.get(3).unwrap_err();
        assert!(matches!(
            err,
            CoreError::IndexOutOfRange {
                component: "Camera",
                index: 3,
                count: 1
            }
        ));
    }

    #[test]
    fn values_can_be_updated_in_place() {
        let mut store = StaticStore::new();
        let idx = store.add(Camera("main"));
        *store.get_mut(idx).unwrap() = Camera("overview");
        assert_eq!(store.as_slice(), &[Camera("overview")]);
    }
}
