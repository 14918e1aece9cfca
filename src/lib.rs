//! A [disjoint-sets/union-find] implementation over string references where every
//! equivalence class can carry a numeric value.
//!
//! The main struct of this crate is [`EquivalenceCtxt`].
//! References are plain strings that come into existence the first time they are
//! mentioned, each in its own class.
//! Classes are joined with the `equivate` method and a value is attached to a class
//! with `set` and read back with `get`.
//! The `equivate` and `get` methods are extremely fast and have an amortized complexity of
//! `O(α(n))` where 'α' is the inverse Ackermann function and `n` the amount of references.
//!
//! ```
//! let mut ctxt = equivalence::EquivalenceCtxt::new();
//!
//! ctxt.equivate("x.a", "x.b");
//! ctxt.set("x.a", 3.14);
//!
//! assert!(ctxt.get("x.b") == Ok(3.14));
//! assert!(ctxt.get("unseen").is_err());
//! ```
//!
//! A value is stored under the representative of its class.
//! When two classes that both carry a value are joined only the value of the surviving
//! representative stays reachable, see [`MergePolicy`] for the alternatives.
//!
//! For each reference we store an index into a [`DisjointSets`] forest which keeps an
//! additional two `usize` values per reference.
//! A more compact implementation that packs both into one `usize` can be enabled with the
//! `compact` feature:
//! ```toml
//! [dependencies.equivalence]
//! version = "0.1"
//! features = ["compact"]
//! ```
//!
//! The [`ffi`] module exposes the context to C callers through an opaque handle.
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
//! [`EquivalenceCtxt`]: struct.EquivalenceCtxt.html
//! [`MergePolicy`]: enum.MergePolicy.html
//! [`DisjointSets`]: struct.DisjointSets.html
//! [`ffi`]: ffi/index.html

extern crate bit_vec;
#[cfg(feature = "rayon")]
extern crate rayon;

/// We count the amount of expresions given to this macro.
#[doc(hidden)]
#[macro_export]
macro_rules! equivalence_count_expr {
    () => { 0usize };
    ($_single: expr) => { 1usize };
    // Even amount of expresions.
    ($($first: expr, $_second: expr),*) => {
        ($crate::equivalence_count_expr![$($first),*] << 1usize)
    };
    // Odd amount of expresions.
    ($_single: expr, $($first: expr, $_second: expr),*) => {
        ($crate::equivalence_count_expr![$($first),*] << 1usize) | 1
    };
}

/// A convenient macro to create a `BitVec` similar to `vec!`.
macro_rules! bit_vec {
    ($element: expr; $len: expr) => {
        bit_vec::BitVec::from_elem($len, $element)
    };
}

pub mod disjoint_sets;
mod error;
pub mod reference_sets;
mod context;
pub mod ffi;

pub use {
    context::{EquivalenceCtxt, MergePolicy},
    disjoint_sets::DisjointSets,
    error::NoValueError,
    reference_sets::ReferenceSets,
};
