//! `i64` sequence with lazy additive range updates.

use split_forest::arena::Arena;
use split_forest::node::{NodeId, TreapNode};
use split_forest::ops;

use crate::error::RopeError;
use crate::rope::check_range;

/// Sequence node carrying a pending additive tag.
///
/// `pending` is the delta still owed by *both child subtrees*; the node's
/// own `value` is always current.  [`TreapNode::push_down`] transfers the
/// tag one level down and clears it, so the tag is empty whenever the
/// engine hands out a child link.
#[derive(Clone, Debug)]
pub struct ShiftNode {
    pub value: i64,
    pub pending: i64,
    pub priority: u64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub size: u32,
}

impl ShiftNode {
    pub fn new(value: i64, priority: u64) -> Self {
        Self {
            value,
            pending: 0,
            priority,
            left: None,
            right: None,
            size: 1,
        }
    }
}

impl TreapNode for ShiftNode {
    #[inline]
    fn left(&self) -> Option<NodeId> {
        self.left
    }
    #[inline]
    fn right(&self) -> Option<NodeId> {
        self.right
    }
    #[inline]
    fn set_left(&mut self, v: Option<NodeId>) {
        self.left = v;
    }
    #[inline]
    fn set_right(&mut self, v: Option<NodeId>) {
        self.right = v;
    }
    #[inline]
    fn size(&self) -> u32 {
        self.size
    }
    #[inline]
    fn set_size(&mut self, v: u32) {
        self.size = v;
    }
    #[inline]
    fn priority(&self) -> u64 {
        self.priority
    }

    fn push_down(arena: &mut Arena<Self>, id: NodeId) {
        let (pending, left, right) = {
            let node = arena.get(id);
            (node.pending, node.left, node.right)
        };
        if pending == 0 {
            return;
        }
        for child in [left, right].into_iter().flatten() {
            let child = arena.get_mut(child);
            child.value += pending;
            child.pending += pending;
        }
        arena.get_mut(id).pending = 0;
    }
}

/// Sequence of `i64` with O(log n) expected insert/delete/slice plus
/// [`range_add`](ShiftList::range_add): add a delta to every element of a
/// window by tagging one split-out subtree root instead of touching each
/// node.
///
/// Structural descents resolve tags via `push_down`; read-only point and
/// range queries instead accumulate the pending deltas of the ancestors
/// they pass, so reads never mutate.
pub struct ShiftList {
    arena: Arena<ShiftNode>,
    root: Option<NodeId>,
}

impl ShiftList {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            arena: Arena::with_seed(seed),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        ops::link_size(&self.arena, self.root) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts `values` so the first lands at position `pos`.
    pub fn insert_at(
        &mut self,
        pos: usize,
        values: impl IntoIterator<Item = i64>,
    ) -> Result<(), RopeError> {
        let len = self.len();
        if pos > len {
            return Err(RopeError::Position { pos, len });
        }
        let (left, right) = ops::split_at(&mut self.arena, self.root, pos as u32);
        let mut middle = None;
        for value in values {
            let priority = self.arena.next_priority();
            let node = self.arena.alloc(ShiftNode::new(value, priority));
            middle = ops::merge(&mut self.arena, middle, Some(node));
        }
        let merged = ops::merge(&mut self.arena, left, middle);
        self.root = ops::merge(&mut self.arena, merged, right);
        Ok(())
    }

    /// Deletes `span` elements starting at `pos`.
    pub fn delete_range(&mut self, pos: usize, span: usize) -> Result<(), RopeError> {
        check_range(pos, span, self.len())?;
        let (left, rest) = ops::split_at(&mut self.arena, self.root, pos as u32);
        let (middle, right) = ops::split_at(&mut self.arena, rest, span as u32);
        ops::free_subtree(&mut self.arena, middle);
        self.root = ops::merge(&mut self.arena, left, right);
        Ok(())
    }

    /// Adds `delta` to every element in `[pos, pos + span)`.
    ///
    /// O(log n) expected: the window is split out, its root takes the tag,
    /// and the halves are merged back.
    pub fn range_add(&mut self, pos: usize, span: usize, delta: i64) -> Result<(), RopeError> {
        check_range(pos, span, self.len())?;
        let (left, rest) = ops::split_at(&mut self.arena, self.root, pos as u32);
        let (middle, right) = ops::split_at(&mut self.arena, rest, span as u32);
        if let Some(id) = middle {
            let node = self.arena.get_mut(id);
            node.value += delta;
            node.pending += delta;
        }
        let merged = ops::merge(&mut self.arena, left, middle);
        self.root = ops::merge(&mut self.arena, merged, right);
        Ok(())
    }

    /// Element at `pos`, with all pending ancestor deltas applied.
    pub fn get(&self, pos: usize) -> Result<i64, RopeError> {
        let len = self.len();
        if pos >= len {
            return Err(RopeError::Position { pos, len });
        }
        let mut k = pos as u32 + 1;
        let mut acc = 0i64;
        let mut curr = self.root;
        while let Some(id) = curr {
            let node = self.arena.get(id);
            let left_size = ops::link_size(&self.arena, node.left);
            if k == left_size + 1 {
                return Ok(node.value + acc);
            }
            acc += node.pending;
            if k <= left_size {
                curr = node.left;
            } else {
                k -= left_size + 1;
                curr = node.right;
            }
        }
        Err(RopeError::Position { pos, len })
    }

    /// The `span` elements starting at `pos`, with pending deltas applied.
    pub fn read_range(&self, pos: usize, span: usize) -> Result<Vec<i64>, RopeError> {
        check_range(pos, span, self.len())?;
        let mut out = Vec::with_capacity(span);
        collect_range(
            &self.arena,
            self.root,
            pos as u32,
            (pos + span) as u32,
            0,
            &mut out,
        );
        Ok(out)
    }

    pub fn to_vec(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len());
        collect_range(&self.arena, self.root, 0, self.len() as u32, 0, &mut out);
        out
    }
}

impl Default for ShiftList {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<i64> for ShiftList {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut list = Self::new();
        let _ = list.insert_at(0, iter);
        list
    }
}

fn collect_range(
    arena: &Arena<ShiftNode>,
    root: Option<NodeId>,
    start: u32,
    end: u32,
    acc: i64,
    out: &mut Vec<i64>,
) {
    let Some(id) = root else { return };
    if start >= end {
        return;
    }
    let node = arena.get(id);
    let left_size = ops::link_size(arena, node.left);
    let child_acc = acc + node.pending;
    if start < left_size {
        collect_range(arena, node.left, start, end.min(left_size), child_acc, out);
    }
    if start <= left_size && left_size < end {
        out.push(node.value + acc);
    }
    if end > left_size + 1 {
        let s = start.saturating_sub(left_size + 1);
        collect_range(arena, node.right, s, end - left_size - 1, child_acc, out);
    }
}
