use std::cell::Cell;

/// The parent and rank of a single reference in the `DisjointSets`.
///
/// For each index in the `DisjointSets` we store a `Metadata`.
#[cfg(not(feature = "compact"))]
#[derive(Clone, Debug, Default)]
pub(crate) struct Metadata {
    /// The parent of the index in its sets tree.
    /// These form an upside down tree where each child has the index of its parent.
    parent: Cell<usize>,
    /// An upper bound to the height of the tree below this index.
    rank: Cell<usize>,
}

#[cfg(not(feature = "compact"))]
impl Metadata {
    /// Create a new `Metadata` for a root with the given index.
    pub(crate) fn new(index: usize) -> Self {
        Self {
            parent: Cell::new(index),
            rank: Cell::new(0),
        }
    }

    /// Return the `parent` variable.
    pub(crate) fn parent(&self) -> usize {
        self.parent.get()
    }

    /// Set the `parent` variable.
    pub(crate) fn set_parent(&self, value: usize) {
        self.parent.set(value);
    }

    /// Return the `rank` variable.
    pub(crate) fn rank(&self) -> usize {
        self.rank.get()
    }

    /// Set the `rank` variable.
    pub(crate) fn set_rank(&self, value: usize) {
        self.rank.set(value);
    }
}

#[cfg(feature = "compact")]
const USIZE_BITS: usize = 8 * ::std::mem::size_of::<usize>();
// You need at least 2 ^ n references in a set to reach a rank of n.
//
// We write the amount of bytes a `usize` contains as 2 ^ B.
// Every reference costs at least one `usize` of metadata so there can be at most
// 2 ^ (2 ^ (B + 3) - B) references, which bounds the rank by 2 ^ (B + 3) - B.
// Storing this rank takes at most B + 3 bits which we take from the low end of the parent.
#[cfg(all(feature = "compact", target_pointer_width = "16"))]
const RANK_BITS: usize = 4;
#[cfg(all(feature = "compact", target_pointer_width = "32"))]
const RANK_BITS: usize = 5;
#[cfg(all(feature = "compact", target_pointer_width = "64"))]
const RANK_BITS: usize = 6;
#[cfg(feature = "compact")]
const MASK: usize = (1 << RANK_BITS) - 1;
#[cfg(feature = "compact")]
const MAX: usize = (1 << (USIZE_BITS - RANK_BITS)) - 1;

/// The parent and rank of a single reference in the `DisjointSets`.
///
/// The rank lives in the lowest `RANK_BITS` bits of the parent word.
#[cfg(feature = "compact")]
#[derive(Clone, Debug, Default)]
pub(crate) struct Metadata {
    packed: Cell<usize>,
}

#[cfg(feature = "compact")]
impl Metadata {
    /// Create a new `Metadata` for a root with the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is above the maximum amount of references the compact
    /// representation can address.
    pub(crate) fn new(index: usize) -> Self {
        if index > MAX {
            panic!("A compact DisjointSets can only hold {} references.", MAX + 1)
        }

        Self {
            packed: Cell::new(index << RANK_BITS),
        }
    }

    /// Return the `parent` variable.
    pub(crate) fn parent(&self) -> usize {
        self.packed.get() >> RANK_BITS
    }

    /// Set the `parent` variable.
    pub(crate) fn set_parent(&self, value: usize) {
        let old = self.packed.get();
        self.packed.set((old & MASK) | (value << RANK_BITS));
    }

    /// Return the `rank` variable.
    pub(crate) fn rank(&self) -> usize {
        self.packed.get() & MASK
    }

    /// Set the `rank` variable.
    pub(crate) fn set_rank(&self, value: usize) {
        debug_assert!(value <= MASK);

        let old = self.packed.get();
        self.packed.set((old & !MASK) | value);
    }
}

#[cfg(test)]
mod tests {
    use super::Metadata;

    #[test]
    fn parent_and_rank_are_independent() {
        let meta = Metadata::new(5);
        assert_eq!(meta.parent(), 5);
        assert_eq!(meta.rank(), 0);

        meta.set_rank(3);
        meta.set_parent(1234);
        assert_eq!(meta.parent(), 1234);
        assert_eq!(meta.rank(), 3);

        meta.set_parent(7);
        assert_eq!(meta.rank(), 3);
        meta.set_rank(4);
        assert_eq!(meta.parent(), 7);
    }
}
