//! Mutable split/merge engine and order-statistics walks.
//!
//! All functions take the arena plus `Option<NodeId>` roots and rewrite
//! links in place.  The copy-on-write variants live in [`crate::cow`].
//!
//! The two primitives are duals:
//!
//! ```text
//! split(T, pivot) ─▶ (L, R)     every element of L precedes every element of R
//! merge(L, R)     ─▶ T          precondition: L precedes R
//! ```
//!
//! `merge` is the only place where random priorities steer the algorithm;
//! `split` recurses down a single root-to-leaf path and reattaches the
//! untouched halves on the way back up.

use std::cmp::Ordering;

use crate::arena::Arena;
use crate::node::{KeyedNode, NodeId, TreapNode};

// ── size bookkeeping ──────────────────────────────────────────────────────

/// Size of an optional subtree (0 for the empty link).
#[inline]
pub fn link_size<N: TreapNode>(arena: &Arena<N>, link: Option<NodeId>) -> u32 {
    link.map_or(0, |id| arena.get(id).size())
}

/// Recompute `size` of `id` from its children.
#[inline]
pub(crate) fn pull_up<N: TreapNode>(arena: &mut Arena<N>, id: NodeId) {
    let l = link_size(arena, arena.get(id).left());
    let r = link_size(arena, arena.get(id).right());
    arena.get_mut(id).set_size(l + r + 1);
}

// ── split / merge ─────────────────────────────────────────────────────────

/// Merge two trees where every element of `a` precedes every element of `b`.
///
/// The precondition is the caller's responsibility; it is not checked here
/// because validating it costs O(n).
pub fn merge<N: TreapNode>(
    arena: &mut Arena<N>,
    a: Option<NodeId>,
    b: Option<NodeId>,
) -> Option<NodeId> {
    let (a_id, b_id) = match (a, b) {
        (None, b) => return b,
        (a, None) => return a,
        (Some(a), Some(b)) => (a, b),
    };
    N::push_down(arena, a_id);
    N::push_down(arena, b_id);
    if arena.get(a_id).priority() >= arena.get(b_id).priority() {
        let inner = arena.get(a_id).right();
        let merged = merge(arena, inner, Some(b_id));
        arena.get_mut(a_id).set_right(merged);
        pull_up(arena, a_id);
        Some(a_id)
    } else {
        let inner = arena.get(b_id).left();
        let merged = merge(arena, Some(a_id), inner);
        arena.get_mut(b_id).set_left(merged);
        pull_up(arena, b_id);
        Some(b_id)
    }
}

/// Split by rank: the left result holds the first `n` elements.
///
/// `n >= size(root)` leaves the right result empty.
pub fn split_at<N: TreapNode>(
    arena: &mut Arena<N>,
    root: Option<NodeId>,
    n: u32,
) -> (Option<NodeId>, Option<NodeId>) {
    let Some(id) = root else { return (None, None) };
    N::push_down(arena, id);
    let left_size = link_size(arena, arena.get(id).left());
    if n <= left_size {
        let left = arena.get(id).left();
        let (a, b) = split_at(arena, left, n);
        arena.get_mut(id).set_left(b);
        pull_up(arena, id);
        (a, Some(id))
    } else {
        let right = arena.get(id).right();
        let (a, b) = split_at(arena, right, n - left_size - 1);
        arena.get_mut(id).set_right(a);
        pull_up(arena, id);
        (Some(id), b)
    }
}

/// Split by key: `(keys ≤ pivot, keys > pivot)`.
pub fn split_by_key<N: KeyedNode>(
    arena: &mut Arena<N>,
    root: Option<NodeId>,
    pivot: &N::Key,
) -> (Option<NodeId>, Option<NodeId>) {
    let Some(id) = root else { return (None, None) };
    N::push_down(arena, id);
    if arena.get(id).key() <= pivot {
        let right = arena.get(id).right();
        let (a, b) = split_by_key(arena, right, pivot);
        arena.get_mut(id).set_right(a);
        pull_up(arena, id);
        (Some(id), b)
    } else {
        let left = arena.get(id).left();
        let (a, b) = split_by_key(arena, left, pivot);
        arena.get_mut(id).set_left(b);
        pull_up(arena, id);
        (a, Some(id))
    }
}

// ── order-statistics walks ────────────────────────────────────────────────

/// Count of keys strictly less than `key`.  Read-only size-guided walk.
pub fn rank_by_key<N: KeyedNode>(arena: &Arena<N>, root: Option<NodeId>, key: &N::Key) -> u32 {
    let mut acc = 0;
    let mut curr = root;
    while let Some(id) = curr {
        let node = arena.get(id);
        if node.key() < key {
            acc += link_size(arena, node.left()) + 1;
            curr = node.right();
        } else {
            curr = node.left();
        }
    }
    acc
}

/// Count of keys less than or equal to `key`.
pub fn count_le<N: KeyedNode>(arena: &Arena<N>, root: Option<NodeId>, key: &N::Key) -> u32 {
    let mut acc = 0;
    let mut curr = root;
    while let Some(id) = curr {
        let node = arena.get(id);
        if node.key() <= key {
            acc += link_size(arena, node.left()) + 1;
            curr = node.right();
        } else {
            curr = node.left();
        }
    }
    acc
}

/// Node holding the `k`-th element, 1-based.  `None` when `k` is outside
/// `[1, size]`.
///
/// Positions are independent of pending lazy tags, so this walk is valid
/// for tagged node types too; only the node's *value* may still owe tags
/// from ancestors, which the caller must resolve.
pub fn select<N: TreapNode>(arena: &Arena<N>, root: Option<NodeId>, k: u32) -> Option<NodeId> {
    if k == 0 {
        return None;
    }
    let mut k = k;
    let mut curr = root;
    while let Some(id) = curr {
        let node = arena.get(id);
        let left_size = link_size(arena, node.left());
        match k.cmp(&(left_size + 1)) {
            Ordering::Equal => return Some(id),
            Ordering::Less => curr = node.left(),
            Ordering::Greater => {
                k -= left_size + 1;
                curr = node.right();
            }
        }
    }
    None
}

/// Excise one node with the given key via a BST descent, merging its
/// subtrees in its place.  Returns the new root and the excised node id
/// (still allocated; the caller decides whether to free it).
pub fn remove_by_key<N: KeyedNode>(
    arena: &mut Arena<N>,
    root: Option<NodeId>,
    key: &N::Key,
) -> (Option<NodeId>, Option<NodeId>) {
    let Some(id) = root else { return (None, None) };
    N::push_down(arena, id);
    match key.cmp(arena.get(id).key()) {
        Ordering::Less => {
            let left = arena.get(id).left();
            let (new_left, removed) = remove_by_key(arena, left, key);
            if removed.is_some() {
                arena.get_mut(id).set_left(new_left);
                pull_up(arena, id);
            }
            (Some(id), removed)
        }
        Ordering::Greater => {
            let right = arena.get(id).right();
            let (new_right, removed) = remove_by_key(arena, right, key);
            if removed.is_some() {
                arena.get_mut(id).set_right(new_right);
                pull_up(arena, id);
            }
            (Some(id), removed)
        }
        Ordering::Equal => {
            let (left, right) = {
                let node = arena.get(id);
                (node.left(), node.right())
            };
            (merge(arena, left, right), Some(id))
        }
    }
}

// ── traversal & checks ────────────────────────────────────────────────────

/// In-order node ids, left to right.
pub struct InOrder<'a, N: TreapNode> {
    arena: &'a Arena<N>,
    stack: Vec<NodeId>,
}

impl<'a, N: TreapNode> InOrder<'a, N> {
    pub fn new(arena: &'a Arena<N>, root: Option<NodeId>) -> Self {
        let mut iter = Self {
            arena,
            stack: Vec::new(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<NodeId>) {
        while let Some(id) = link {
            self.stack.push(id);
            link = self.arena.get(id).left();
        }
    }
}

impl<'a, N: TreapNode> Iterator for InOrder<'a, N> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.arena.get(id).right());
        Some(id)
    }
}

/// Return every slot of a subtree to the free list.
pub fn free_subtree<N: TreapNode>(arena: &mut Arena<N>, root: Option<NodeId>) {
    let Some(id) = root else { return };
    let (left, right) = {
        let node = arena.get(id);
        (node.left(), node.right())
    };
    free_subtree(arena, left);
    free_subtree(arena, right);
    arena.dealloc(id);
}

/// True when every cached `size` equals the recomputed subtree count.
pub fn check_sizes<N: TreapNode>(arena: &Arena<N>, root: Option<NodeId>) -> bool {
    fn walk<N: TreapNode>(arena: &Arena<N>, link: Option<NodeId>) -> Option<u32> {
        let Some(id) = link else { return Some(0) };
        let node = arena.get(id);
        let l = walk(arena, node.left())?;
        let r = walk(arena, node.right())?;
        let computed = l + r + 1;
        (node.size() == computed).then_some(computed)
    }
    walk(arena, root).is_some()
}
