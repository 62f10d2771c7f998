//! In-memory integer-keyed storage

use super::baked::BakedIndex;
use super::entry::Entry;
use super::id_alloc::IdAllocator;
use crate::error::StoreError;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-memory store of values keyed by unique non-negative integer ids.
///
/// The ordered map is the single source of truth; iteration order is
/// ascending id order. The id allocator is kept in lockstep with the map:
/// every key present has exactly one bit set in the allocator and vice
/// versa. Ids are unique, values are not — the same value may be stored
/// under several ids.
///
/// This is the single-threaded core. `SharedStore` wraps it in a
/// coarse-grained lock for use from several threads.
pub struct MemoryStore<T> {
    /// Authoritative id -> value mapping, sorted by id
    map: BTreeMap<i32, Arc<T>>,

    /// Bits of the ids currently in use
    ids: IdAllocator,

    /// Lazily materialized snapshot of all entries in ascending id order.
    /// Invalidated (set to None) by every structural write, never partially
    /// updated.
    entry_cache: Option<Arc<[Entry<T>]>>,
}

impl<T> MemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore {
            map: BTreeMap::new(),
            ids: IdAllocator::new(),
            entry_cache: None,
        }
    }

    /// Insert a value under the given id.
    ///
    /// Fails if `id` is negative or already a key; the store is unchanged
    /// on failure. Only ids are checked for collision — a value already
    /// stored under another id is accepted. Returns a snapshot of the
    /// inserted entry.
    pub fn add(&mut self, id: i32, value: Arc<T>) -> Result<Entry<T>, StoreError> {
        if id < 0 {
            return Err(StoreError::NegativeId(id));
        }

        match self.map.entry(id) {
            btree_map::Entry::Occupied(_) => Err(StoreError::IdTaken(id)),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&value));
                self.ids.set(id as usize);
                self.entry_cache = None;
                Ok(Entry::new(id, value))
            }
        }
    }

    /// Remove the entry with the given id.
    ///
    /// Returns false (not an error) for a negative or absent id.
    pub fn remove_id(&mut self, id: i32) -> bool {
        if id < 0 {
            return false;
        }

        if self.map.remove(&id).is_some() {
            self.ids.clear(id as usize);
            self.entry_cache = None;
            true
        } else {
            false
        }
    }

    /// Remove the entry holding this exact value, matched by identity.
    ///
    /// Returns false if no entry holds the same allocation (see `get_id`).
    pub fn remove_value(&mut self, value: &Arc<T>) -> bool {
        match self.get_id(value) {
            Some(id) => self.remove_id(id),
            None => false,
        }
    }

    /// Id of the first entry (in ascending id order) holding this exact
    /// value.
    ///
    /// Matching is by identity, not equality: a structurally equal value in
    /// a different allocation does not match. O(n) scan over the entry
    /// snapshot.
    pub fn get_id(&mut self, value: &Arc<T>) -> Option<i32> {
        let entries = self.entries();
        entries
            .iter()
            .find(|entry| Arc::ptr_eq(entry.value_handle(), value))
            .map(|entry| entry.id())
    }

    /// Current value under this id, if any.
    ///
    /// O(log n) point read against the live map; does not touch the caches.
    pub fn get_value(&self, id: i32) -> Option<Arc<T>> {
        if id < 0 {
            return None;
        }
        self.map.get(&id).map(Arc::clone)
    }

    /// Number of entries currently stored
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Smallest non-negative integer not currently used as an id.
    ///
    /// Advisory only: nothing is reserved, so a later `add` may find the
    /// suggestion already taken.
    pub fn next_id(&self) -> i32 {
        self.ids.first_clear() as i32
    }

    /// Clear the store and the id allocator.
    ///
    /// The entry cache becomes an explicit empty snapshot rather than being
    /// invalidated, so iteration after a reset returns empty without
    /// recomputation.
    pub fn reset(&mut self) {
        self.map.clear();
        self.ids.clear_all();
        self.entry_cache = Some(Arc::from(Vec::new()));
    }

    /// All entries in ascending id order, as an immutable shared snapshot.
    ///
    /// Materialized lazily on first call and reused until the next
    /// structural write. The returned slice never changes after this call;
    /// repeated calls between writes return the same allocation. This is
    /// the shared backbone for `get_id`, iteration and the sort-merge
    /// lookup.
    pub fn entries(&mut self) -> Arc<[Entry<T>]> {
        let cache = self.entry_cache.get_or_insert_with(|| {
            self.map
                .iter()
                .map(|(&id, value)| Entry::new(id, Arc::clone(value)))
                .collect()
        });
        Arc::clone(cache)
    }

    /// Export the current state as a dense, offset-addressed snapshot.
    ///
    /// Fails with `StoreError::Empty` when the store has no entries (its
    /// key range is undefined). The snapshot covers every id in
    /// `[min, max]` inclusive, gaps included, and is deliberately decoupled
    /// from later writes — see [`BakedIndex`] for the staleness contract.
    pub fn bake(&self) -> Result<BakedIndex<T>, StoreError> {
        let (&min, _) = self.map.first_key_value().ok_or(StoreError::Empty)?;
        let (&max, _) = self.map.last_key_value().ok_or(StoreError::Empty)?;

        let mut slots = vec![None; (max - min + 1) as usize];
        for (&id, value) in &self.map {
            slots[(id - min) as usize] = Some(Entry::new(id, Arc::clone(value)));
        }

        Ok(BakedIndex::new(min, slots))
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut store = MemoryStore::new();
        let value = Arc::new(String::from("alpha"));

        let entry = store.add(3, Arc::clone(&value)).unwrap();
        assert_eq!(entry.id(), 3);
        assert_eq!(entry.value(), "alpha");

        assert_eq!(store.get_value(3).as_deref(), Some(&String::from("alpha")));
        assert_eq!(store.get_id(&value), Some(3));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_duplicate_id_fails_even_with_other_value() {
        let mut store = MemoryStore::new();
        store.add(1, Arc::new(String::from("a"))).unwrap();

        let err = store.add(1, Arc::new(String::from("b"))).unwrap_err();
        assert_eq!(err, StoreError::IdTaken(1));
        // Store unchanged by the failed add
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_value(1).as_deref(), Some(&String::from("a")));
    }

    #[test]
    fn test_add_negative_id_fails() {
        let mut store = MemoryStore::new();
        let err = store.add(-1, Arc::new(String::from("a"))).unwrap_err();

        assert_eq!(err, StoreError::NegativeId(-1));
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_values_under_different_ids_accepted() {
        let mut store = MemoryStore::new();
        let value = Arc::new(String::from("shared"));

        store.add(0, Arc::clone(&value)).unwrap();
        store.add(9, Arc::clone(&value)).unwrap();

        assert_eq!(store.len(), 2);
        // get_id finds the first match in ascending id order
        assert_eq!(store.get_id(&value), Some(0));
    }

    #[test]
    fn test_remove_id() {
        let mut store = MemoryStore::new();
        store.add(2, Arc::new(String::from("a"))).unwrap();

        assert!(store.remove_id(2));
        assert_eq!(store.get_value(2), None);
        assert_eq!(store.len(), 0);

        // Soft misses, no error
        assert!(!store.remove_id(2));
        assert!(!store.remove_id(-5));
    }

    #[test]
    fn test_removed_id_suggested_again() {
        let mut store = MemoryStore::new();
        for id in 0..4 {
            store.add(id, Arc::new(id.to_string())).unwrap();
        }
        assert_eq!(store.next_id(), 4);

        store.remove_id(1);
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn test_remove_value_matches_identity_only() {
        let mut store = MemoryStore::new();
        let stored = Arc::new(String::from("v"));
        store.add(5, Arc::clone(&stored)).unwrap();

        // Equal content, different allocation: no match
        assert!(!store.remove_value(&Arc::new(String::from("v"))));
        assert_eq!(store.len(), 1);

        assert!(store.remove_value(&stored));
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_value_negative_or_missing() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_value(0), None);

        store.add(0, Arc::new(String::from("a"))).unwrap();
        assert_eq!(store.get_value(-1), None);
        assert_eq!(store.get_value(1), None);
    }

    #[test]
    fn test_reset() {
        let mut store = MemoryStore::new();
        store.add(0, Arc::new(String::from("a"))).unwrap();
        store.add(7, Arc::new(String::from("b"))).unwrap();

        store.reset();

        assert_eq!(store.len(), 0);
        assert!(store.entries().is_empty());
        assert_eq!(store.next_id(), 0);
    }

    #[test]
    fn test_entries_ordered_and_cached() {
        let mut store = MemoryStore::new();
        store.add(5, Arc::new(String::from("a"))).unwrap();
        store.add(0, Arc::new(String::from("b"))).unwrap();

        let entries = store.entries();
        let ids: Vec<i32> = entries.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![0, 5]);

        // Same snapshot until the next write
        let again = store.entries();
        assert!(Arc::ptr_eq(&entries, &again));

        store.add(2, Arc::new(String::from("c"))).unwrap();
        let rebuilt = store.entries();
        assert!(!Arc::ptr_eq(&entries, &rebuilt));
        assert_eq!(rebuilt.len(), 3);
    }

    #[test]
    fn test_bake_empty_store_fails() {
        let store: MemoryStore<String> = MemoryStore::new();
        assert_eq!(store.bake().unwrap_err(), StoreError::Empty);
    }

    #[test]
    fn test_bake_covers_full_range_with_gaps() {
        let mut store = MemoryStore::new();
        for id in [2, 3, 7] {
            store.add(id, Arc::new(id.to_string())).unwrap();
        }

        let baked = store.bake().unwrap();
        assert_eq!(baked.offset(), 2);
        // Dense over [2, 7] inclusive
        assert_eq!(baked.len(), 6);
        assert!(baked.get(4).is_none());
        assert_eq!(baked.get(7).map(|e| e.id()), Some(7));
    }

    #[test]
    fn test_next_id_fills_smallest_gap() {
        let mut store = MemoryStore::new();
        store.add(5, Arc::new(String::from("a"))).unwrap();
        store.add(0, Arc::new(String::from("b"))).unwrap();

        assert_eq!(store.next_id(), 1);
    }
}
