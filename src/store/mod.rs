//! Integer-keyed storage module
//!
//! Core data structures for the store: the authoritative ordered map, the
//! id allocator, entry snapshots and the baked dense index. This module is
//! independent of the locking facade and the bulk-lookup strategies (loose
//! coupling).

mod baked;
mod entry;
mod id_alloc;
mod memory;

pub use baked::BakedIndex;
pub use entry::Entry;
pub use id_alloc::IdAllocator;
pub use memory::MemoryStore;
