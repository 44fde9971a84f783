//! Arena-based split/merge treap primitives.
//!
//! A treap keeps a binary search tree balanced in expectation by giving
//! every node an independently drawn random priority and maintaining a
//! max-heap on priorities.  This crate implements the split/merge flavor
//! (no rotations): every structural operation is expressed through two
//! dual primitives, `split` and `merge`, each a single root-to-leaf pass.
//!
//! Instead of raw pointers, all links are [`NodeId`] indices into a
//! [`Arena`]-owned `Vec`, which makes the copy-on-write discipline of the
//! persistence layer checkable: old versions hold old ids, and the cow
//! engine never writes through an existing id.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`node`]  | [`NodeId`], [`TreapNode`] / [`KeyedNode`] traits, [`KeyNode`] |
//! | [`arena`] | [`Arena`]: node pool + seeded priority PRNG |
//! | [`ops`]   | mutable engine: `merge`, `split_at`, `split_by_key`, rank/select walks |
//! | [`cow`]   | copy-on-write engine (path copying, versions share subtrees) |
//! | [`tree`]  | [`Treap`]: owned order-statistics multiset |
//! | [`error`] | [`ForestError`] |
//!
//! Downstream crates build the persistence layer (`split-forest-versioned`)
//! and the rope/editor layer (`split-forest-rope`) on the same engine.

pub mod arena;
pub mod cow;
pub mod error;
pub mod node;
pub mod ops;
pub mod tree;

pub use arena::Arena;
pub use error::ForestError;
pub use node::{KeyNode, KeyedNode, NodeId, TreapNode};
pub use tree::Treap;
