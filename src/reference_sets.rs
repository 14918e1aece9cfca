//! Disjoint sets keyed by string references instead of indices.
//!
//! See [`ReferenceSets`] for more information.
//!
//! [`ReferenceSets`]: struct.ReferenceSets.html

use {
    std::{
        collections::HashMap,
        sync::Arc,
    },
    crate::disjoint_sets::{DisjointSets, Merged},
};

/// Disjoint sets keyed by string references.
///
/// Each reference is given an index the first time it is registered and that index
/// never changes, so the hot `find` path works on indices and only the entry into the
/// structure hashes the string.
/// References that were never registered behave as singletons in the methods that take
/// `&self`.
///
/// # Examples
///
/// ```
/// use equivalence::ReferenceSets;
///
/// let mut sets = ReferenceSets::new();
/// sets.union("x.a", "x.b");
/// sets.union("x.b", "x.c");
///
/// assert!(sets.same_set("x.a", "x.c"));
/// assert!(!sets.same_set("x.a", "y"));
/// assert!(sets.representative("x.a") == "x.b");
/// ```
#[derive(Clone, Default)]
pub struct ReferenceSets {
    indices: HashMap<Arc<str>, usize>,
    /// The reference of each index, this vec will always have the same length as `sets`.
    /// It shares its strings with the keys of `indices`.
    references: Vec<Arc<str>>,
    sets: DisjointSets,
}

impl ReferenceSets {
    /// Constructs a new, empty `ReferenceSets`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty `ReferenceSets` that can hold `capacity` references
    /// without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: HashMap::with_capacity(capacity),
            references: Vec::with_capacity(capacity),
            sets: DisjointSets::with_capacity(capacity),
        }
    }

    /// Returns the amount of registered references.
    #[inline]
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// Returns `true` if no reference was registered yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Reserves capacity for at least `additional` more references.
    pub fn reserve(&mut self, additional: usize) {
        self.indices.reserve(additional);
        self.references.reserve(additional);
        self.sets.reserve(additional);
    }

    /// Returns `true` if `reference` has been registered.
    #[inline]
    pub fn contains(&self, reference: &str) -> bool {
        self.indices.contains_key(reference)
    }

    /// Returns the index of `reference` if it has been registered.
    #[inline]
    pub fn index_of(&self, reference: &str) -> Option<usize> {
        self.indices.get(reference).cloned()
    }

    /// Returns the reference registered under `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    #[inline]
    pub fn reference(&self, index: usize) -> &str {
        &self.references[index]
    }

    /// Returns the index of `reference`, registering it in a new singleton set if it
    /// was not seen before.
    pub fn register(&mut self, reference: &str) -> usize {
        if let Some(&index) = self.indices.get(reference) {
            return index
        }

        let index = self.sets.push();
        let reference: Arc<str> = reference.into();
        self.references.push(Arc::clone(&reference));
        self.indices.insert(reference, index);

        index
    }

    /// Returns the index of the representative of the set of `reference`.
    ///
    /// Unseen references are registered first.
    pub fn find(&mut self, reference: &str) -> usize {
        let index = self.register(reference);

        self.sets.find(index)
    }

    /// Returns the index of the representative of the set that `index` belongs to.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    #[inline]
    pub fn find_index(&self, index: usize) -> usize {
        self.sets.find(index)
    }

    /// Returns the reference that represents the set of `reference`.
    ///
    /// Unseen references are registered first and represent themselves.
    pub fn representative(&mut self, reference: &str) -> &str {
        let root = self.find(reference);

        &self.references[root]
    }

    /// Joins the sets of `first_reference` and `second_reference`, registering them when needed.
    ///
    /// Returns `None` if they already shared a set.
    /// On equal ranks the representative of `second_reference` survives.
    pub fn union(&mut self, first_reference: &str, second_reference: &str) -> Option<Merged> {
        let first_index = self.register(first_reference);
        let second_index = self.register(second_reference);

        self.sets.union(first_index, second_index)
    }

    /// Joins the sets of two registered indices.
    ///
    /// # Panics
    ///
    /// If `first_index` or `second_index` is out of bounds.
    #[inline]
    pub fn union_indices(&mut self, first_index: usize, second_index: usize) -> Option<Merged> {
        self.sets.union(first_index, second_index)
    }

    /// Returns `true` if both references share a set.
    ///
    /// This never registers a reference, an unseen reference only shares a set with itself.
    pub fn same_set(&self, first_reference: &str, second_reference: &str) -> bool {
        match (self.index_of(first_reference), self.index_of(second_reference)) {
            (Some(first_index), Some(second_index)) => self.sets.same_set(first_index, second_index),
            _ => first_reference == second_reference,
        }
    }

    /// Returns the amount of sets of registered references.
    #[inline]
    pub fn amount_of_sets(&self) -> usize {
        self.sets.amount_of_sets()
    }
}

impl std::fmt::Debug for ReferenceSets {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut builder = formatter.debug_map();

        for (index, reference) in self.references.iter().enumerate() {
            builder.entry(reference, &self.references[self.sets.find(index)]);
        }

        builder.finish()
    }
}
