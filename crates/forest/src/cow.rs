//! Copy-on-write split/merge engine.
//!
//! Same semantics as [`crate::ops`], but no node reachable from the input
//! roots is ever written through.  Every node whose links must change is
//! cloned first and the rewrite happens on the clone, so older roots keep
//! observing the tree exactly as it was.  Untouched subtrees are shared
//! between versions by reference.
//!
//! These variants are for tag-free node types: resolving a lazy tag in
//! place would leak the write into children shared with older versions.
//! The persistence layer only ever stores [`KeyNode`](crate::node::KeyNode),
//! which carries no tag.

use std::cmp::Ordering;

use crate::arena::Arena;
use crate::node::{KeyedNode, NodeId, TreapNode};
use crate::ops::pull_up;

#[inline]
fn clone_node<N: Clone>(arena: &mut Arena<N>, id: NodeId) -> NodeId {
    let copy = arena.get(id).clone();
    arena.alloc(copy)
}

/// Copy-on-write [`merge`](crate::ops::merge): the winning root is cloned
/// before one of its links is rewritten.
///
/// Merging with an empty operand returns the other root unchanged; sharing
/// it is safe because it will never be written through either.
pub fn merge_cow<N: TreapNode + Clone>(
    arena: &mut Arena<N>,
    a: Option<NodeId>,
    b: Option<NodeId>,
) -> Option<NodeId> {
    let (a_id, b_id) = match (a, b) {
        (None, b) => return b,
        (a, None) => return a,
        (Some(a), Some(b)) => (a, b),
    };
    if arena.get(a_id).priority() >= arena.get(b_id).priority() {
        let copy = clone_node(arena, a_id);
        let inner = arena.get(copy).right();
        let merged = merge_cow(arena, inner, Some(b_id));
        arena.get_mut(copy).set_right(merged);
        pull_up(arena, copy);
        Some(copy)
    } else {
        let copy = clone_node(arena, b_id);
        let inner = arena.get(copy).left();
        let merged = merge_cow(arena, Some(a_id), inner);
        arena.get_mut(copy).set_left(merged);
        pull_up(arena, copy);
        Some(copy)
    }
}

/// Copy-on-write split by rank.
pub fn split_at_cow<N: TreapNode + Clone>(
    arena: &mut Arena<N>,
    root: Option<NodeId>,
    n: u32,
) -> (Option<NodeId>, Option<NodeId>) {
    let Some(id) = root else { return (None, None) };
    let copy = clone_node(arena, id);
    let left_size = crate::ops::link_size(arena, arena.get(copy).left());
    if n <= left_size {
        let left = arena.get(copy).left();
        let (a, b) = split_at_cow(arena, left, n);
        arena.get_mut(copy).set_left(b);
        pull_up(arena, copy);
        (a, Some(copy))
    } else {
        let right = arena.get(copy).right();
        let (a, b) = split_at_cow(arena, right, n - left_size - 1);
        arena.get_mut(copy).set_right(a);
        pull_up(arena, copy);
        (Some(copy), b)
    }
}

/// Copy-on-write split by key: `(keys ≤ pivot, keys > pivot)`.
pub fn split_by_key_cow<N: KeyedNode + Clone>(
    arena: &mut Arena<N>,
    root: Option<NodeId>,
    pivot: &N::Key,
) -> (Option<NodeId>, Option<NodeId>) {
    let Some(id) = root else { return (None, None) };
    let copy = clone_node(arena, id);
    if arena.get(copy).key() <= pivot {
        let right = arena.get(copy).right();
        let (a, b) = split_by_key_cow(arena, right, pivot);
        arena.get_mut(copy).set_right(a);
        pull_up(arena, copy);
        (Some(copy), b)
    } else {
        let left = arena.get(copy).left();
        let (a, b) = split_by_key_cow(arena, left, pivot);
        arena.get_mut(copy).set_left(b);
        pull_up(arena, copy);
        (a, Some(copy))
    }
}

/// Copy-on-write removal of at most one node with the given key.
///
/// Returns the new root and whether a node was excised.  Only the descent
/// path down to the match is copied; a miss copies nothing and returns the
/// original root.
pub fn remove_by_key_cow<N: KeyedNode + Clone>(
    arena: &mut Arena<N>,
    root: Option<NodeId>,
    key: &N::Key,
) -> (Option<NodeId>, bool) {
    let Some(id) = root else { return (None, false) };
    match key.cmp(arena.get(id).key()) {
        Ordering::Less => {
            let left = arena.get(id).left();
            let (new_left, removed) = remove_by_key_cow(arena, left, key);
            if !removed {
                return (Some(id), false);
            }
            let copy = clone_node(arena, id);
            arena.get_mut(copy).set_left(new_left);
            pull_up(arena, copy);
            (Some(copy), true)
        }
        Ordering::Greater => {
            let right = arena.get(id).right();
            let (new_right, removed) = remove_by_key_cow(arena, right, key);
            if !removed {
                return (Some(id), false);
            }
            let copy = clone_node(arena, id);
            arena.get_mut(copy).set_right(new_right);
            pull_up(arena, copy);
            (Some(copy), true)
        }
        Ordering::Equal => {
            let (left, right) = {
                let node = arena.get(id);
                (node.left(), node.right())
            };
            (merge_cow(arena, left, right), true)
        }
    }
}
