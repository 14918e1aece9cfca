//! A [disjoint-sets/union-find] forest over the indices `0 .. len`.
//!
//! See [`DisjointSets`] for more information.
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
//! [`DisjointSets`]: struct.DisjointSets.html

use {
    std::cmp::Ordering,
    crate::disjoint_sets::metadata::Metadata,
};

/// A [disjoint-sets/union-find] forest over the indices `0 .. len`.
///
/// Every index pushed onto the forest starts in its own set and sets are joined with
/// the `union` method.
/// The representative of a set is found with `find` which compacts the path it walks,
/// so `find` only needs `&self`.
///
/// When two roots of equal rank are joined the root of the second index survives.
/// This makes the representative of a merged set depend only on the order of the unions.
///
/// # Examples
///
/// ```
/// use equivalence::DisjointSets;
///
/// let mut sets = DisjointSets::new();
/// let a = sets.push();
/// let b = sets.push();
/// let c = sets.push();
///
/// sets.union(a, b);
///
/// assert!(sets.same_set(a, b));
/// assert!(!sets.same_set(a, c));
/// assert!(sets.amount_of_sets() == 2);
/// ```
///
/// [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
#[derive(Clone, Default)]
pub struct DisjointSets {
    meta: Vec<Metadata>,
}

/// The outcome of a `union` that joined two different sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Merged {
    /// The root of the joined set.
    pub root: usize,
    /// The root that was attached below `root` and stopped being a representative.
    pub absorbed: usize,
}

impl DisjointSets {
    /// Constructs a new, empty `DisjointSets`.
    #[inline]
    pub fn new() -> Self {
        Self {
            meta: Vec::new(),
        }
    }

    /// Constructs a new, empty `DisjointSets` that can hold `capacity` indices
    /// without reallocating.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            meta: Vec::with_capacity(capacity),
        }
    }

    /// Returns the amount of indices in the forest.
    #[inline]
    pub fn len(&self) -> usize {
        self.meta.len()
    }

    /// Returns `true` if no index was pushed yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.meta.is_empty()
    }

    /// Reserves capacity for at least `additional` more indices.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.meta.reserve(additional);
    }

    /// Adds a new index in its own set and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut sets = equivalence::DisjointSets::new();
    ///
    /// assert!(sets.push() == 0);
    /// assert!(sets.push() == 1);
    /// assert!(sets.find(1) == 1);
    /// ```
    #[inline]
    pub fn push(&mut self) -> usize {
        let index = self.meta.len();
        self.meta.push(Metadata::new(index));

        index
    }

    /// Joins the sets of the `first_index` and the `second_index`.
    ///
    /// Returns `None` if they already shared a set.
    /// Otherwise the returned `Merged` tells which root survived and which root was
    /// attached below it.
    ///
    /// This method will be executed in `O(α(n))` time where `α` is the inverse
    /// Ackermann function. The inverse Ackermann function has value below 5
    /// for any value of `n` that can be written in the physical universe.
    ///
    /// # Panics
    ///
    /// If `first_index` or `second_index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence::{DisjointSets, disjoint_sets::Merged};
    ///
    /// let mut sets = DisjointSets::new();
    /// let (a, b, c) = (sets.push(), sets.push(), sets.push());
    ///
    /// // Equal ranks, the second root survives.
    /// assert!(sets.union(a, b) == Some(Merged { root: b, absorbed: a }));
    /// // The higher rank survives.
    /// assert!(sets.union(b, c) == Some(Merged { root: b, absorbed: c }));
    /// assert!(sets.union(a, c) == None);
    /// ```
    pub fn union(&mut self, first_index: usize, second_index: usize) -> Option<Merged> {
        let i = self.find(first_index);
        let j = self.find(second_index);

        if i == j {
            return None
        }

        // We add to the tree with the highest rank.
        let merged = match Ord::cmp(&self.meta[i].rank(), &self.meta[j].rank()) {
            Ordering::Less => {
                self.meta[i].set_parent(j);
                Merged { root: j, absorbed: i }
            },
            Ordering::Equal => {
                // We add the first tree to the second tree.
                self.meta[i].set_parent(j);
                // The second tree becomes larger.
                self.meta[j].set_rank(self.meta[j].rank() + 1);
                Merged { root: j, absorbed: i }
            },
            Ordering::Greater => {
                self.meta[j].set_parent(i);
                Merged { root: i, absorbed: j }
            },
        };

        Some(merged)
    }

    /// Returns `true` if `first_index` and `second_index` are in the same set.
    ///
    /// # Panics
    ///
    /// If `first_index` or `second_index` are out of bounds.
    #[inline]
    pub fn same_set(&self, first_index: usize, second_index: usize) -> bool {
        self.find(first_index) == self.find(second_index)
    }

    /// Returns the amount of sets in the forest.
    ///
    /// This method will be executed in `O(n α(n))` where `α` is the inverse Ackermann function.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut sets = equivalence::DisjointSets::new();
    ///
    /// for _ in 0 .. 5 {
    ///     sets.push();
    /// }
    /// sets.union(0, 2);
    /// sets.union(1, 3);
    ///
    /// assert!(sets.amount_of_sets() == 3);
    /// ```
    pub fn amount_of_sets(&self) -> usize {
        let mut done = bit_vec![false; self.len()];
        let mut count = 0;

        for i in 0 .. self.len() {
            let root = self.find(i);

            if !done[root] {
                done.set(root, true);
                count += 1;
            }
        }

        count
    }

    /// Gives the representative of the set that `index` belongs to.
    ///
    /// This method will be executed in `O(α(n))` time where `α` is the inverse
    /// Ackermann function. Each index of a set will give the same value.
    /// Every index on the way to the root is pointed directly at the root.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub fn find(&self, index: usize) -> usize {
        // If the node is its own parent we have found the root.
        if self.meta[index].parent() == index {
            index
        } else {
            // Union by rank bounds the depth of this recursion by `log2(n)`.
            let root = self.find(self.meta[index].parent());

            self.meta[index].set_parent(root);

            root
        }
    }

    /// Gives the representative of the set that `index` belongs to without
    /// updating any parents.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    #[inline]
    pub(crate) fn find_final(&self, mut index: usize) -> usize {
        while index != self.meta[index].parent() {
            index = self.meta[index].parent();
        }

        index
    }
}

impl std::fmt::Debug for DisjointSets {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.debug_list()
            .entries((0 .. self.len()).map(|i| self.find_final(i)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest(len: usize) -> DisjointSets {
        let mut sets = DisjointSets::with_capacity(len);
        for _ in 0 .. len {
            sets.push();
        }
        sets
    }

    #[test]
    fn pushed_indices_are_singletons() {
        let sets = forest(4);

        for i in 0 .. 4 {
            assert_eq!(sets.find(i), i);
        }
        assert_eq!(sets.amount_of_sets(), 4);
    }

    #[test]
    fn union_with_itself_does_nothing() {
        let mut sets = forest(2);

        assert_eq!(sets.union(1, 1), None);
        assert_eq!(sets.find(1), 1);
        assert_eq!(sets.amount_of_sets(), 2);
    }

    #[test]
    fn equal_ranks_keep_the_second_root() {
        let mut sets = forest(4);

        assert_eq!(sets.union(0, 1), Some(Merged { root: 1, absorbed: 0 }));
        assert_eq!(sets.union(2, 3), Some(Merged { root: 3, absorbed: 2 }));
        assert_eq!(sets.union(0, 2), Some(Merged { root: 3, absorbed: 1 }));

        for i in 0 .. 4 {
            assert_eq!(sets.find(i), 3);
        }
    }

    #[test]
    fn find_compacts_paths() {
        let mut sets = forest(8);

        // Build a tree of rank 3 so that index 0 sits three levels deep.
        sets.union(0, 1);
        sets.union(2, 3);
        sets.union(1, 3);
        sets.union(4, 5);
        sets.union(6, 7);
        sets.union(5, 7);
        sets.union(3, 7);

        assert_ne!(sets.meta[0].parent(), 7);
        assert_eq!(sets.find(0), 7);
        assert_eq!(sets.meta[0].parent(), 7);
        assert_eq!(sets.meta[1].parent(), 7);
    }

    #[test]
    fn debug_shows_roots() {
        let mut sets = forest(3);
        sets.union(0, 2);

        assert_eq!(format!("{:?}", sets), "[2, 1, 2]");
    }
}
