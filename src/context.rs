//! The equivalence context: reference classes with a value per class and a setup flag.

use {
    std::{
        collections::HashMap,
        iter::FromIterator,
    },
    bit_vec::BitVec,
    tracing::{debug, trace},
    crate::{
        disjoint_sets::Merged,
        error::NoValueError,
        reference_sets::ReferenceSets,
    },
};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "proptest")]
use proptest::prelude::*;

/// What happens to the value of a class whose representative is absorbed by `equivate`.
///
/// In both policies the absorbed representative stops holding a value, so there is
/// at most one value per class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// The value of the absorbed representative becomes unreachable.
    ///
    /// If only the absorbed side had a value the merged class has none.
    #[default]
    Orphan,
    /// The value of the absorbed representative moves to the surviving representative
    /// when that one has no value of its own.
    ///
    /// If both sides had a value the value of the surviving representative wins.
    Adopt,
}

/// A set of string references partitioned in equivalence classes where every class
/// can carry one `f64`.
///
/// References do not have to be declared, every method that takes `&mut self`
/// registers an unseen reference as a new singleton class.
/// Values are stored under the representative of a class, `set` overwrites the value of
/// the whole class and `get` reads it from any member.
///
/// A separate flag records that the caller finished its setup phase.
/// It can be raised once with `mark_setup_done` and never affects the other operations.
///
/// # Examples
///
/// ```
/// use equivalence::EquivalenceCtxt;
///
/// let mut ctxt = EquivalenceCtxt::new();
/// ctxt.set("a", 1.0);
/// ctxt.equivate("a", "b");
/// ctxt.set("b", 2.0);
///
/// assert!(ctxt.get("a") == Ok(2.0));
/// assert!(ctxt.get("b") == Ok(2.0));
///
/// assert!(ctxt.mark_setup_done());
/// assert!(!ctxt.mark_setup_done());
/// assert!(ctxt.is_setup_done());
/// ```
#[derive(Clone, Default)]
pub struct EquivalenceCtxt {
    sets: ReferenceSets,
    /// The value of each index, only meaningful where `has_value` is set.
    /// This vec will always have the same length as `sets`.
    values: Vec<f64>,
    has_value: BitVec,
    policy: MergePolicy,
    setup: bool,
}

/// Creates an [`EquivalenceCtxt`] in which each given pair of references shares a class.
///
/// ```
/// # #[macro_use]
/// # extern crate equivalence;
/// #
/// # fn main() {
/// let ctxt = equivalences![
///     "x.a" => "x.b",
///     "x.b" => "x.c",
///     "y.a" => "y.b",
/// ];
///
/// assert!(ctxt.same_class("x.a", "x.c"));
/// assert!(!ctxt.same_class("x.a", "y.a"));
/// assert!(ctxt.amount_of_classes() == 2);
/// # }
/// ```
///
/// [`EquivalenceCtxt`]: struct.EquivalenceCtxt.html
#[macro_export]
macro_rules! equivalences {
    () => {
        $crate::EquivalenceCtxt::new()
    };
    ($($first: expr => $second: expr),+ $(,)*) => {
        {
            let len = $crate::equivalence_count_expr![$($first),*];
            let mut ctxt = $crate::EquivalenceCtxt::with_capacity(2 * len);

            $(
                ctxt.equivate($first, $second);
            )*

            ctxt
        }
    };
}

impl EquivalenceCtxt {
    /// Constructs a new, empty `EquivalenceCtxt` with the setup flag lowered.
    ///
    /// # Examples
    ///
    /// ```
    /// let ctxt = equivalence::EquivalenceCtxt::new();
    ///
    /// assert!(ctxt.is_empty());
    /// assert!(!ctxt.is_setup_done());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty `EquivalenceCtxt` that can hold `capacity` references
    /// without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sets: ReferenceSets::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            has_value: BitVec::with_capacity(capacity),
            policy: MergePolicy::default(),
            setup: false,
        }
    }

    /// Constructs a new, empty `EquivalenceCtxt` that handles merged values with `policy`.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence::{EquivalenceCtxt, MergePolicy};
    ///
    /// let mut ctxt = EquivalenceCtxt::with_policy(MergePolicy::Adopt);
    /// ctxt.set("a", 1.0);
    /// ctxt.equivate("a", "b");
    ///
    /// // With the default policy this value would be lost.
    /// assert!(ctxt.get("b") == Ok(1.0));
    /// ```
    pub fn with_policy(policy: MergePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Returns the policy used for values of merged classes.
    #[inline]
    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Returns the amount of references that have been mentioned.
    #[inline]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns `true` if no reference has been mentioned yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Returns `true` if `reference` has been mentioned.
    #[inline]
    pub fn contains(&self, reference: &str) -> bool {
        self.sets.contains(reference)
    }

    /// Returns the amount of equivalence classes among the mentioned references.
    ///
    /// This method will be executed in `O(n α(n))` time.
    #[inline]
    pub fn amount_of_classes(&self) -> usize {
        self.sets.amount_of_sets()
    }

    /// Returns the reference that currently represents the class of `reference`.
    ///
    /// An unseen reference is registered and represents itself.
    /// The representative can change with every `equivate` that joins the class with
    /// another one.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut ctxt = equivalence::EquivalenceCtxt::new();
    ///
    /// assert!(ctxt.find("a") == "a");
    ///
    /// ctxt.equivate("a", "b");
    /// let representative = ctxt.find("a").to_owned();
    /// assert!(representative == ctxt.find("b"));
    /// ```
    pub fn find(&mut self, reference: &str) -> &str {
        let root = self.root(reference);

        self.sets.reference(root)
    }

    /// Returns `true` if both references are in the same class.
    ///
    /// This does not register anything, an unseen reference is only equivalent to itself.
    #[inline]
    pub fn same_class(&self, first_reference: &str, second_reference: &str) -> bool {
        self.sets.same_set(first_reference, second_reference)
    }

    /// Joins the classes of `first_reference` and `second_reference`.
    ///
    /// Joining a class with itself does nothing.
    /// Otherwise the representative of one side is absorbed by the other and its value is
    /// handled according to the [`MergePolicy`].
    /// When the classes are equally deep the representative of `second_reference` survives.
    ///
    /// This method will be executed in `O(α(n))` time.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut ctxt = equivalence::EquivalenceCtxt::new();
    ///
    /// ctxt.equivate("a", "b");
    /// ctxt.equivate("b", "c");
    ///
    /// assert!(ctxt.same_class("a", "c"));
    /// ```
    ///
    /// [`MergePolicy`]: enum.MergePolicy.html
    pub fn equivate(&mut self, first_reference: &str, second_reference: &str) {
        let first_index = self.register(first_reference);
        let second_index = self.register(second_reference);

        if let Some(merged) = self.sets.union_indices(first_index, second_index) {
            self.absorb(merged);
        }
    }

    /// Stores `value` for the class of `reference`, overwriting its previous value.
    pub fn set(&mut self, reference: &str, value: f64) {
        let root = self.root(reference);

        self.values[root] = value;
        self.has_value.set(root, true);
    }

    /// Returns the value of the class of `reference`.
    ///
    /// An unseen reference is registered before the lookup, which then fails.
    ///
    /// # Errors
    ///
    /// Returns a `NoValueError` if the current representative of the class has no value.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut ctxt = equivalence::EquivalenceCtxt::new();
    ///
    /// let error = ctxt.get("unseen").unwrap_err();
    /// assert!(error.reference() == "unseen");
    /// assert!(ctxt.contains("unseen"));
    /// ```
    pub fn get(&mut self, reference: &str) -> Result<f64, NoValueError> {
        let root = self.root(reference);

        self.value_of_root(root).ok_or_else(|| NoValueError::new(reference))
    }

    /// Returns the value of the class of `reference` if there is one.
    ///
    /// Unlike `get` this does not register an unseen reference.
    pub fn try_get(&self, reference: &str) -> Option<f64> {
        let index = self.sets.index_of(reference)?;

        self.value_of_root(self.sets.find_index(index))
    }

    /// Raises the setup flag.
    ///
    /// Returns `true` if the flag was lowered before this call and `false` if it was
    /// already raised, in which case nothing changes.
    pub fn mark_setup_done(&mut self) -> bool {
        if self.setup {
            return false
        }

        debug!("equivalence setup done");
        self.setup = true;

        true
    }

    /// Returns `true` once `mark_setup_done` has been called.
    #[inline]
    pub fn is_setup_done(&self) -> bool {
        self.setup
    }

    fn register(&mut self, reference: &str) -> usize {
        let index = self.sets.register(reference);

        // Indices are handed out in order so a new index is always the next slot.
        if index == self.values.len() {
            self.values.push(0.0);
            self.has_value.push(false);
        }

        index
    }

    fn root(&mut self, reference: &str) -> usize {
        let index = self.register(reference);

        self.sets.find_index(index)
    }

    #[inline]
    fn value_of_root(&self, root: usize) -> Option<f64> {
        if self.has_value[root] {
            Some(self.values[root])
        } else {
            None
        }
    }

    fn absorb(&mut self, Merged { root, absorbed }: Merged) {
        trace!(
            root = %self.sets.reference(root),
            absorbed = %self.sets.reference(absorbed),
            "joined equivalence classes"
        );

        let value = match self.value_of_root(absorbed) {
            Some(value) => value,
            None => return,
        };
        self.has_value.set(absorbed, false);

        if self.policy == MergePolicy::Adopt && !self.has_value[root] {
            self.values[root] = value;
            self.has_value.set(root, true);
        } else {
            debug!(
                reference = %self.sets.reference(absorbed),
                representative = %self.sets.reference(root),
                value,
                "value orphaned by merge"
            );
        }
    }
}

impl std::fmt::Debug for EquivalenceCtxt {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        // We map the roots to `usize` names.
        let mut map = HashMap::with_capacity(self.len());
        let mut builder = formatter.debug_list();
        let mut names = 0;

        for index in 0 .. self.len() {
            let root = self.sets.find_index(index);

            let name = *map.entry(root).or_insert_with(|| {
                names += 1;
                names - 1
            });

            let reference = self.sets.reference(index);
            match self.value_of_root(index) {
                Some(value) if index == root => {
                    builder.entry(&format_args!("{:?} => {} ({:?})", reference, name, value));
                },
                _ => {
                    builder.entry(&format_args!("{:?} => {}", reference, name));
                },
            }
        }

        builder.finish()
    }
}

impl PartialEq for EquivalenceCtxt {
    /// Two contexts are equal if they know the same references, partition them the same
    /// way, give each class the same value and agree on the setup flag.
    /// The representatives and the order in which references were mentioned do not matter.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() || self.setup != other.setup {
            return false
        }

        // We map the roots of self to the roots of other and back.
        let mut forward = HashMap::with_capacity(self.len());
        let mut backward = HashMap::with_capacity(self.len());

        for index in 0 .. self.len() {
            let other_index = match other.sets.index_of(self.sets.reference(index)) {
                Some(other_index) => other_index,
                None => return false,
            };

            let self_root = self.sets.find_index(index);
            let other_root = other.sets.find_index(other_index);

            if *forward.entry(self_root).or_insert(other_root) != other_root {
                return false
            }
            if *backward.entry(other_root).or_insert(self_root) != self_root {
                return false
            }
            if self.value_of_root(self_root) != other.value_of_root(other_root) {
                return false
            }
        }

        true
    }
}

impl<A, B> Extend<(A, B)> for EquivalenceCtxt where
    A: AsRef<str>,
    B: AsRef<str>,
{
    fn extend<I>(&mut self, iter: I) where I: IntoIterator<Item = (A, B)> {
        for (first_reference, second_reference) in iter {
            self.equivate(first_reference.as_ref(), second_reference.as_ref());
        }
    }
}

impl<A, B> FromIterator<(A, B)> for EquivalenceCtxt where
    A: AsRef<str>,
    B: AsRef<str>,
{
    fn from_iter<I>(iter: I) -> Self where I: IntoIterator<Item = (A, B)> {
        let mut ctxt = Self::new();
        ctxt.extend(iter);

        ctxt
    }
}

#[cfg(feature = "rayon")]
impl<A, B> ParallelExtend<(A, B)> for EquivalenceCtxt where
    A: AsRef<str> + Send,
    B: AsRef<str> + Send,
{
    fn par_extend<I>(&mut self, par_iter: I) where I: IntoParallelIterator<Item = (A, B)> {
        // The pairs can be produced in parallel, the unions have to happen in order.
        let pairs: Vec<(A, B)> = par_iter.into_par_iter().collect();

        self.reserve_pairs(pairs.len());
        self.extend(pairs);
    }
}

#[cfg(feature = "rayon")]
impl<A, B> FromParallelIterator<(A, B)> for EquivalenceCtxt where
    A: AsRef<str> + Send,
    B: AsRef<str> + Send,
{
    fn from_par_iter<I>(par_iter: I) -> Self where I: IntoParallelIterator<Item = (A, B)> {
        let mut ctxt = Self::new();
        ctxt.par_extend(par_iter);

        ctxt
    }
}

#[cfg(feature = "rayon")]
impl EquivalenceCtxt {
    fn reserve_pairs(&mut self, pairs: usize) {
        self.sets.reserve(2 * pairs);
        self.values.reserve(2 * pairs);
        self.has_value.reserve(2 * pairs);
    }
}

#[cfg(feature = "proptest")]
impl Arbitrary for EquivalenceCtxt {
    type Parameters = proptest::collection::SizeRange;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(size_range: Self::Parameters) -> Self::Strategy {
        let reference = "[a-f]\\.[a-d]";
        let unions = proptest::collection::vec((reference, reference), size_range.clone());
        let values = proptest::collection::vec((reference, -1.0e6 .. 1.0e6f64), size_range);

        (unions, values, any::<bool>()).prop_map(|(unions, values, setup)| {
            let mut ctxt: Self = unions.into_iter().collect();

            for (reference, value) in values {
                ctxt.set(&reference, value);
            }
            if setup {
                ctxt.mark_setup_done();
            }

            ctxt
        }).boxed()
    }
}
