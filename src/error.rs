//! Store error types

use std::fmt;

/// Errors returned by store operations.
///
/// Only hard misuse is an error. Soft misses (removing an absent id,
/// reading an unmapped id) surface as `false` or `None` instead — they are
/// expected outcomes, not failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Ids are non-negative; `add` rejects anything below zero
    NegativeId(i32),

    /// The id is already a key in the store
    IdTaken(i32),

    /// The store has no entries, so its key range is undefined
    Empty,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NegativeId(id) => write!(f, "id cannot be negative (got {})", id),
            StoreError::IdTaken(id) => write!(f, "id {} is already contained within the store", id),
            StoreError::Empty => write!(f, "cannot bake an empty store"),
        }
    }
}

impl std::error::Error for StoreError {}
