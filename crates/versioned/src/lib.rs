//! Persistent (copy-on-write) versioned order-statistics trees.
//!
//! A [`VersionStore`] keeps a list of committed roots over one shared,
//! append-only [`Arena`].  Mutations never write through a node reachable
//! from an existing version: the cow engine clones the access path and the
//! new version's root is appended to the list, so every older version stays
//! valid and queryable forever.  Rollback is just a [`checkout`] of an
//! earlier [`VersionId`]; no undo log is needed because old roots are
//! frozen.
//!
//! Each logical mutation allocates O(log n) expected extra nodes (the
//! copied access path); untouched subtrees are shared between versions.

mod error;
mod store;

pub use error::VersionError;
pub use store::{VersionId, VersionRef, VersionStore};
