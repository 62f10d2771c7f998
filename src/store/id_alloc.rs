//! Bit-set allocator for in-use ids

/// Tracks which non-negative ids are currently in use and suggests the
/// smallest free one.
///
/// Suggestions are advisory only: nothing is reserved, so a caller must
/// treat `first_clear` as a hint, not a lease. The store keeps this set in
/// lockstep with its key map under the same exclusive-access discipline.
#[derive(Debug, Default)]
pub struct IdAllocator {
    /// One bit per id, 64 ids per word
    words: Vec<u64>,
}

impl IdAllocator {
    /// Create an empty allocator
    pub fn new() -> Self {
        IdAllocator { words: Vec::new() }
    }

    /// Mark an id as in use
    pub fn set(&mut self, id: usize) {
        let word = id / 64;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1 << (id % 64);
    }

    /// Mark an id as free
    pub fn clear(&mut self, id: usize) {
        if let Some(word) = self.words.get_mut(id / 64) {
            *word &= !(1 << (id % 64));
        }
    }

    /// Check whether an id is in use
    pub fn contains(&self, id: usize) -> bool {
        self.words
            .get(id / 64)
            .map_or(false, |word| word & (1 << (id % 64)) != 0)
    }

    /// Smallest id not currently in use
    pub fn first_clear(&self) -> usize {
        for (i, word) in self.words.iter().enumerate() {
            if *word != u64::MAX {
                return i * 64 + word.trailing_ones() as usize;
            }
        }
        self.words.len() * 64
    }

    /// Mark every id as free
    pub fn clear_all(&mut self) {
        self.words.clear();
    }
}
