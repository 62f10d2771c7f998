//! Dense array snapshot for offset-addressed lookup

use super::entry::Entry;

/// A point-in-time dense export of the store over its full key range.
///
/// Produced only by an explicit `MemoryStore::bake`. Slot `i` corresponds
/// to id `offset + i`; ids that had no entry at bake time are `None`.
///
/// The snapshot does not observe later writes: after any add or remove it
/// is stale (it may miss new entries, still contain removed ones, or answer
/// for the wrong key range) until the store is baked again. Freshness and
/// key range are the caller's contract — lookups guard neither, and an id
/// outside `[offset, offset + len)` panics. This is the deliberate
/// unsafe-fast-path trade-off that buys O(1) per-id lookup.
#[derive(Debug)]
pub struct BakedIndex<T> {
    /// Smallest id present at bake time
    pub(crate) offset: i32,

    /// One slot per id in `[offset, offset + len)`
    pub(crate) slots: Vec<Option<Entry<T>>>,
}

impl<T> BakedIndex<T> {
    pub(crate) fn new(offset: i32, slots: Vec<Option<Entry<T>>>) -> Self {
        BakedIndex { offset, slots }
    }

    /// Smallest id covered by the snapshot
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Number of slots, occupied or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// A bake never succeeds on an empty store, so this is always false
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Entry baked for this id, if the slot is occupied.
    ///
    /// Precondition: `id` lies within `[offset, offset + len)`. Out-of-range
    /// ids panic.
    pub fn get(&self, id: i32) -> Option<&Entry<T>> {
        self.slots[(id - self.offset) as usize].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn baked_over(ids: &[i32]) -> BakedIndex<String> {
        let mut store = MemoryStore::new();
        for &id in ids {
            store.add(id, Arc::new(id.to_string())).unwrap();
        }
        store.bake().unwrap()
    }

    #[test]
    fn test_get_in_range() {
        let baked = baked_over(&[10, 12]);

        assert_eq!(baked.offset(), 10);
        assert_eq!(baked.len(), 3);
        assert_eq!(baked.get(12).map(|e| e.value().as_str()), Some("12"));
        assert!(baked.get(11).is_none());
    }

    #[test]
    #[should_panic]
    fn test_get_below_range_panics() {
        let baked = baked_over(&[10, 12]);
        baked.get(9);
    }

    #[test]
    #[should_panic]
    fn test_get_above_range_panics() {
        let baked = baked_over(&[10, 12]);
        baked.get(13);
    }
}
