use crate::ecs::EntityId;

/// Forward cursor over a normalized component store.
///
/// Holds the borrowed record slice plus a position, so peeking the head
/// entity is O(1). Valid until the next `add`, removal or renormalize on the
/// store it came from, which the borrow checker enforces.
pub struct Cursor<'w, T> {
    records: &'w [(EntityId, T)],
    pos: usize,
}

impl<'w, T> Cursor<'w, T> {
    #[inline]
    pub(crate) fn new(records: &'w [(EntityId, T)]) -> Self {
        Self { records, pos: 0 }
    }

    /// A cursor that is exhausted from the start.
    #[inline]
    pub fn empty() -> Self {
        Self::new(&[])
    }

    /// Entity id of the current head, or `None` once exhausted.
    #[inline]
    pub fn peek_entity(&self) -> Option<EntityId> {
        self.records.get(self.pos).map(|(entity, _)| *entity)
    }

    /// Current head record.
    #[inline]
    pub fn current(&self) -> Option<(EntityId, &'w T)> {
        let records: &'w [(EntityId, T)] = self.records;
        records.get(self.pos).map(|(entity, value)| (*entity, value))
    }

    /// Move to the next record.
    #[inline]
    pub fn advance(&mut self) {
        if self.pos < self.records.len() {
            self.pos += 1;
        }
    }

    /// Skip every record whose entity is below `target`.
    pub fn seek(&mut self, target: EntityId) {
        let rest = &self.records[self.pos..];
        self.pos += rest.partition_point(|(entity, _)| *entity < target);
    }

    /// Skip every record at or below `entity`.
    pub fn skip_entity(&mut self, entity: EntityId) {
        let rest = &self.records[self.pos..];
        self.pos += rest.partition_point(|(e, _)| *e <= entity);
    }

    /// All records of the head entity, in insertion order. Empty when
    /// exhausted.
    pub fn run(&self) -> &'w [(EntityId, T)] {
        let Some(head) = self.peek_entity() else {
            return &[];
        };
        let records: &'w [(EntityId, T)] = self.records;
        let rest = &records[self.pos..];
        let len = rest.partition_point(|(e, _)| *e == head);
        &rest[..len]
    }

    /// Rewind to the first record.
    #[inline]
    pub fn restart(&mut self) {
        self.pos = 0;
    }

    /// Records not yet passed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.records.len() - self.pos
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records,
            pos: self.pos,
        }
    }
}

impl<'w, T> Iterator for Cursor<'w, T> {
    type Item = (EntityId, &'w T);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current()?;
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<(EntityId, char)> {
        vec![(1, 'a'), (3, 'b'), (3, 'c'), (3, 'd'), (7, 'e'), (9, 'f')]
    }

    #[test]
    fn peek_and_advance() {
        let records = sample();
        let mut cursor = Cursor::new(&records);
        assert_eq!(cursor.peek_entity(), Some(1));
        cursor.advance();
        assert_eq!(cursor.current(), Some((3, &'b')));
        for _ in 0..10 {
            cursor.advance();
        }
        assert_eq!(cursor.peek_entity(), None);
        cursor.restart();
        assert_eq!(cursor.peek_entity(), Some(1));
    }

    #[test]
    fn seek_lands_on_first_record_not_below_target() {
        let records = sample();
        let mut cursor = Cursor::new(&records);
        cursor.seek(3);
        assert_eq!(cursor.current(), Some((3, &'b')));
        cursor.seek(4);
        assert_eq!(cursor.peek_entity(), Some(7));
        cursor.seek(7);
        assert_eq!(cursor.peek_entity(), Some(7));
        cursor.seek(100);
        assert_eq!(cursor.peek_entity(), None);
    }

    #[test]
    fn run_and_skip_cover_all_instances() {
        let records = sample();
        let mut cursor = Cursor::new(&records);
        cursor.seek(3);
        let run: Vec<char> = cursor.run().iter().map(|(_, c)| *c).collect();
        assert_eq!(run, vec!['b', 'c', 'd']);
        cursor.skip_entity(3);
        assert_eq!(cursor.peek_entity(), Some(7));
        // Skipping an entity that is not at the head is a no-op.
        cursor.skip_entity(3);
        assert_eq!(cursor.peek_entity(), Some(7));
    }

    #[test]
    fn skip_entity_passes_everything_up_to_the_target() {
        let records = sample();
        let mut cursor = Cursor::new(&records);
        // Head is 1, below the target; the run of 3s goes with it.
        cursor.skip_entity(3);
        assert_eq!(cursor.peek_entity(), Some(7));

        let mut cursor = Cursor::new(&records);
        cursor.skip_entity(5);
        assert_eq!(cursor.peek_entity(), Some(7));
        cursor.skip_entity(0);
        assert_eq!(cursor.peek_entity(), Some(7));
        cursor.skip_entity(EntityId::MAX);
        assert_eq!(cursor.peek_entity(), None);
    }

    #[test]
    fn iterates_in_order() {
        let records = sample();
        let ids: Vec<EntityId> = Cursor::new(&records).map(|(e, _)| e).collect();
        assert_eq!(ids, vec![1, 3, 3, 3, 7, 9]);
        assert_eq!(Cursor::<char>::empty().next(), None);
    }
}
