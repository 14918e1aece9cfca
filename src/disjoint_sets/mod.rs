//! Contains the implementation of the [disjoint-sets/union-find] over indices.
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure

mod metadata;
pub mod forest;

pub use self::forest::{DisjointSets, Merged};
