//! Rank-indexed sequences over the split/merge engine.
//!
//! The keyed treap of `split-forest` orders nodes by key; here keys are
//! implicit — a node's position *is* its in-order rank, and `split_at`
//! divides a sequence into its first `n` elements and the rest.  That is
//! all a rope needs for O(log n) insert/delete/slice at arbitrary
//! positions.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`rope`]   | [`Rope`]: generic sequence (insert_at / delete_range / read_range) |
//! | [`shift`]  | [`ShiftList`]: `i64` sequence with a lazy additive range tag |
//! | [`editor`] | [`Editor`]: cursor-relative text editing over `Rope<char>` |
//! | [`error`]  | [`RopeError`] |
//!
//! All position and length arguments are validated against the current
//! size; violations surface as [`RopeError`] and are never clamped.

pub mod editor;
pub mod error;
pub mod rope;
pub mod shift;

pub use editor::Editor;
pub use error::RopeError;
pub use rope::Rope;
pub use shift::ShiftList;
