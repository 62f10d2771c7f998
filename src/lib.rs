//! TableDB - a small in-memory store of integer-keyed values
//!
//! TableDB is built around one identity model (unique non-negative integer
//! ids, lazy immutable snapshotting, advisory id allocation) and three
//! interchangeable strategies for resolving a batch of ids into entries:
//! - naive per-id point lookups
//! - a sort-merge join against a cached sorted entry view
//! - a pre-baked dense array indexed by offset
//!
//! Modules follow strong cohesion and loose coupling principles:
//! - Storage knows nothing about locking
//! - Lookup strategies build only on the store's snapshot surfaces
//! - No circular dependencies between modules

pub mod error;
pub mod lookup;
pub mod shared;
pub mod store;

/// Re-export commonly used types
pub use error::StoreError;
pub use shared::SharedStore;
pub use store::{BakedIndex, Entry, IdAllocator, MemoryStore};
