//! Free-index tracking strategies.
//!
//! A pool remembers released slot indices so that the next allocation can
//! reuse one instead of growing the table. How it picks among them is a
//! strategy chosen by type parameter; the pool contract is the same either
//! way.
//!
//! - [`FreeStack`]: LIFO. The most recently released index comes back
//!   first, which keeps hot slots hot.
//! - [`FreeBitmap`]: always the lowest free index, which keeps live slots
//!   packed toward the front of the table.

/// Set of released slot indices awaiting reuse.
///
/// A pool never pushes an index that is already in the set.
pub trait FreeIndices: Default {
    /// Mark `index` as free.
    fn push(&mut self, index: u32);

    /// Take one free index, if any.
    fn pop(&mut self) -> Option<u32>;

    /// Number of free indices.
    fn len(&self) -> usize;

    /// Whether no index is free.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every free index.
    fn clear(&mut self);
}

/// LIFO free list backed by a `Vec<u32>`.
#[derive(Clone, Debug, Default)]
pub struct FreeStack {
    indices: Vec<u32>,
}

impl FreeIndices for FreeStack {
    fn push(&mut self, index: u32) {
        self.indices.push(index);
    }

    fn pop(&mut self) -> Option<u32> {
        self.indices.pop()
    }

    fn len(&self) -> usize {
        self.indices.len()
    }

    fn clear(&mut self) {
        self.indices.clear();
    }
}

const WORD_BITS: u32 = u64::BITS;

/// Two-level bitmap that hands out the lowest free index.
///
/// Leaf bit `i` is set when index `i` is free. Summary bit `w` is set when
/// leaf word `w` has any bit set, so finding the lowest free index scans
/// one summary word per 4096 indices and then touches a single leaf word.
#[derive(Clone, Debug, Default)]
pub struct FreeBitmap {
    leaves: Vec<u64>,
    summary: Vec<u64>,
    count: usize,
}

impl FreeBitmap {
    /// Whether `index` is currently marked free.
    pub fn contains(&self, index: u32) -> bool {
        let (word, bit) = split(index);
        self.leaves
            .get(word)
            .is_some_and(|leaf| leaf & (1u64 << bit) != 0)
    }
}

fn split(index: u32) -> (usize, u32) {
    ((index / WORD_BITS) as usize, index % WORD_BITS)
}

impl FreeIndices for FreeBitmap {
    fn push(&mut self, index: u32) {
        let (word, bit) = split(index);
        if word >= self.leaves.len() {
            self.leaves.resize(word + 1, 0);
            self.summary
                .resize(self.leaves.len().div_ceil(WORD_BITS as usize), 0);
        }
        debug_assert!(
            self.leaves[word] & (1u64 << bit) == 0,
            "index {index} pushed twice"
        );
        self.leaves[word] |= 1u64 << bit;
        let (s_word, s_bit) = split(word as u32);
        self.summary[s_word] |= 1u64 << s_bit;
        self.count += 1;
    }

    fn pop(&mut self) -> Option<u32> {
        let s_word = self.summary.iter().position(|&w| w != 0)?;
        let word = s_word * WORD_BITS as usize + self.summary[s_word].trailing_zeros() as usize;
        let bit = self.leaves[word].trailing_zeros();

        self.leaves[word] &= !(1u64 << bit);
        if self.leaves[word] == 0 {
            let (s_word, s_bit) = split(word as u32);
            self.summary[s_word] &= !(1u64 << s_bit);
        }
        self.count -= 1;
        Some(word as u32 * WORD_BITS + bit)
    }

    fn len(&self) -> usize {
        self.count
    }

    fn clear(&mut self) {
        self.leaves.clear();
        self.summary.clear();
        self.count = 0;
    }
}
