//! Entity ids
//!
//! Entities carry no data of their own; an entity is whatever set of
//! component records share its id. Ids are minted by a monotone counter and
//! never reused.

/// Bare 64-bit entity id. Zero is an ordinary value.
pub type EntityId = u64;

/// Monotone id source. Hands out `n + 1` after `n` and never regresses.
#[derive(Debug, Clone)]
pub struct EntityAllocator {
    next: EntityId,
}

impl EntityAllocator {
    pub const fn starting_at(first: EntityId) -> Self {
        Self { next: first }
    }

    /// Mint a fresh id.
    ///
    /// # Panics
    /// Panics if the 64-bit id space is exhausted.
    pub fn allocate(&mut self) -> EntityId {
        let id = self.next;
        self.next = self
            .next
            .checked_add(1)
            .unwrap_or_else(|| panic!("entity id space exhausted"));
        id
    }

    /// The id the next call to [`allocate`](Self::allocate) returns.
    #[inline]
    pub fn peek(&self) -> EntityId {
        self.next
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
