//! Bulk lookup strategies
//!
//! Three ways to resolve a batch of ids against the store, with different
//! cost and consistency trade-offs:
//!
//! - `MemoryStore::bulk_lookup_naive` — independent O(log n) point lookups,
//!   O(k log n) total. Always consistent with the live map; results follow
//!   input order, duplicate inputs produce duplicate results.
//! - `MemoryStore::bulk_lookup` — sort-merge join against the cached entry
//!   list, O(k log k + n) total. The intended strategy for large batches;
//!   results come back in ascending id order and duplicate inputs collapse
//!   to one emission per matching entry.
//! - `BakedIndex::lookup_many` — O(1) offset arithmetic per id into a baked
//!   snapshot, O(k) total. Fastest, but stale or out-of-range ids are the
//!   caller's problem (see `BakedIndex`).
//!
//! All three return an empty result for an empty id batch without touching
//! the store.

use crate::store::{BakedIndex, Entry, MemoryStore};

impl<T> MemoryStore<T> {
    /// Resolve each id independently against the live map.
    ///
    /// Results follow the argument order; ids with no entry are skipped,
    /// duplicate ids that resolve produce duplicate results.
    pub fn bulk_lookup_naive(&self, keys: &[i32]) -> Vec<Entry<T>> {
        if keys.is_empty() {
            return Vec::new();
        }

        let mut found = Vec::with_capacity(keys.len());
        for &key in keys {
            if let Some(value) = self.get_value(key) {
                found.push(Entry::new(key, value));
            }
        }
        found
    }

    /// Resolve a batch of ids with a sort-merge join over the entry cache.
    ///
    /// The input is copied and sorted; the caller's slice is not mutated.
    /// One linear pass walks the sorted ids and the ascending entry
    /// snapshot with two cursors, emitting an entry whenever the cursors
    /// agree. Results come back in ascending id order, and duplicate input
    /// ids emit at most once per matching entry — both divergences from the
    /// naive strategy are part of the contract.
    pub fn bulk_lookup(&mut self, keys: &[i32]) -> Vec<Entry<T>> {
        if keys.is_empty() {
            return Vec::new();
        }

        let mut sorted = keys.to_vec();
        sorted.sort_unstable();

        let entries = self.entries();
        let mut found = Vec::with_capacity(keys.len());
        let mut n = 0;

        for entry in entries.iter() {
            while n < sorted.len() && sorted[n] < entry.id() {
                n += 1;
            }
            if n >= sorted.len() {
                break;
            }
            if sorted[n] == entry.id() {
                found.push(entry.clone());
            }
        }

        found
    }
}

impl<T> BakedIndex<T> {
    /// Resolve each id by direct offset arithmetic into the baked array.
    ///
    /// Precondition (unchecked): the snapshot is fresh — no write has hit
    /// the store since `bake` — and every id lies within
    /// `[offset, offset + len)`. An out-of-range id panics; a stale
    /// snapshot silently answers with bake-time state.
    pub fn lookup_many(&self, keys: &[i32]) -> Vec<Entry<T>> {
        if keys.is_empty() {
            return Vec::new();
        }

        let mut found = Vec::with_capacity(keys.len());
        for &key in keys {
            if let Some(entry) = &self.slots[(key - self.offset) as usize] {
                found.push(entry.clone());
            }
        }
        found
    }
}
