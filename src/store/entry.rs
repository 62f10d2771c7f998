//! Entry structure for id-value snapshot pairs

use std::fmt;
use std::sync::Arc;

/// An immutable (id, value) pair returned to callers.
///
/// Entries are snapshots: once constructed, both fields are fixed. They are
/// read-only facts about the store at a point in time, not live views. The
/// value sits behind an `Arc` so snapshots share the stored allocation and
/// can be compared by identity.
pub struct Entry<T> {
    /// The id, unique within the store at snapshot time
    id: i32,

    /// Shared handle on the stored value
    value: Arc<T>,
}

impl<T> Entry<T> {
    pub(crate) fn new(id: i32, value: Arc<T>) -> Self {
        Entry { id, value }
    }

    /// The entry's id
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Borrow the stored value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The shared handle on the stored value, for identity comparison
    pub fn value_handle(&self) -> &Arc<T> {
        &self.value
    }
}

// No `T: Clone` bound: cloning an entry only bumps the Arc
impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Entry {
            id: self.id,
            value: Arc::clone(&self.value),
        }
    }
}

/// Identity-based equality: same id and the *same allocation*, not
/// structurally equal values
impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.value, &other.value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Entry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("value", &self.value)
            .finish()
    }
}
