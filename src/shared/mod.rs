//! Shared-store facade
//!
//! Wraps the single-threaded `MemoryStore` in one coarse-grained exclusive
//! lock so a store instance can be used from several threads. Every public
//! operation — read or write — is a single critical section over the whole
//! store, so no caller ever observes the map, the id allocator or the entry
//! cache out of lockstep.
//!
//! Baked snapshots are returned by value and live outside the lock: their
//! staleness remains the caller's contract, exactly as with the unlocked
//! core.

use crate::error::StoreError;
use crate::store::{BakedIndex, Entry, MemoryStore};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Thread-safe facade over a `MemoryStore`.
///
/// All operations are synchronous and complete in bounded time; nothing
/// blocks on I/O or defers work to background threads.
pub struct SharedStore<T> {
    inner: Mutex<MemoryStore<T>>,
}

impl<T> SharedStore<T> {
    /// Create an empty shared store
    pub fn new() -> Self {
        SharedStore {
            inner: Mutex::new(MemoryStore::new()),
        }
    }

    /// Insert a value under the given id. See `MemoryStore::add`.
    pub fn add(&self, id: i32, value: Arc<T>) -> Result<Entry<T>, StoreError> {
        let entry = self.inner.lock().add(id, value)?;
        debug!("added entry id={}", id);
        Ok(entry)
    }

    /// Remove the entry with the given id, returns true if it existed
    pub fn remove_id(&self, id: i32) -> bool {
        let removed = self.inner.lock().remove_id(id);
        if removed {
            debug!("removed entry id={}", id);
        }
        removed
    }

    /// Remove the entry holding this exact value, matched by identity
    pub fn remove_value(&self, value: &Arc<T>) -> bool {
        let removed = self.inner.lock().remove_value(value);
        if removed {
            debug!("removed entry by value");
        }
        removed
    }

    /// Id of the first entry holding this exact value, matched by identity
    pub fn get_id(&self, value: &Arc<T>) -> Option<i32> {
        self.inner.lock().get_id(value)
    }

    /// Current value under this id, if any
    pub fn get_value(&self, id: i32) -> Option<Arc<T>> {
        self.inner.lock().get_value(id)
    }

    /// Number of entries currently stored
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Smallest non-negative integer not currently used as an id.
    ///
    /// Advisory only, and doubly so here: another thread may take the
    /// suggestion between this call and a later `add`.
    pub fn next_id(&self) -> i32 {
        self.inner.lock().next_id()
    }

    /// Clear the store and the id allocator
    pub fn reset(&self) {
        self.inner.lock().reset();
        debug!("store reset");
    }

    /// All entries in ascending id order, as an immutable shared snapshot
    pub fn entries(&self) -> Arc<[Entry<T>]> {
        self.inner.lock().entries()
    }

    /// Export the current state as a dense snapshot. See `MemoryStore::bake`.
    pub fn bake(&self) -> Result<BakedIndex<T>, StoreError> {
        let baked = self.inner.lock().bake()?;
        debug!("baked {} slots at offset {}", baked.len(), baked.offset());
        Ok(baked)
    }

    /// Resolve each id independently against the live map
    pub fn bulk_lookup_naive(&self, keys: &[i32]) -> Vec<Entry<T>> {
        self.inner.lock().bulk_lookup_naive(keys)
    }

    /// Resolve a batch of ids with a sort-merge join over the entry cache
    pub fn bulk_lookup(&self, keys: &[i32]) -> Vec<Entry<T>> {
        self.inner.lock().bulk_lookup(keys)
    }
}

impl<T> Default for SharedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
