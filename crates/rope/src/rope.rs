//! Generic rank-indexed sequence.

use split_forest::arena::Arena;
use split_forest::node::{NodeId, TreapNode};
use split_forest::ops;

use crate::error::RopeError;

/// Sequence node: payload plus the usual treap bookkeeping, no key.
#[derive(Clone, Debug)]
pub struct SeqNode<T> {
    pub value: T,
    pub priority: u64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub size: u32,
}

impl<T> SeqNode<T> {
    pub fn new(value: T, priority: u64) -> Self {
        Self {
            value,
            priority,
            left: None,
            right: None,
            size: 1,
        }
    }
}

impl<T> TreapNode for SeqNode<T> {
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
}

/// Sequence with O(log n) expected insert/delete/slice at any position.
///
/// Positions are 0-based.  A position argument may equal `len` only where
/// it denotes an insertion point.
pub struct Rope<T> {
    arena: Arena<SeqNode<T>>,
    root: Option<NodeId>,
}

impl<T> Rope<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Rope with a seeded priority PRNG, for reproducible shapes.
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

    /// Inserts `items` so the first lands at position `pos`.
    /// `pos` may equal `len` (append).
    pub fn insert_at(
        &mut self,
        pos: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Result<(), RopeError> {
        let len = self.len();
        if pos > len {
            return Err(RopeError::Position { pos, len });
        }
        let (left, right) = ops::split_at(&mut self.arena, self.root, pos as u32);
        let mut middle = None;
        for value in items {
            let priority = self.arena.next_priority();
            let node = self.arena.alloc(SeqNode::new(value, priority));
            middle = ops::merge(&mut self.arena, middle, Some(node));
        }
        let merged = ops::merge(&mut self.arena, left, middle);
        self.root = ops::merge(&mut self.arena, merged, right);
        Ok(())
    }

    /// Deletes `span` elements starting at `pos`.
    pub fn delete_range(&mut self, pos: usize, span: usize) -> Result<(), RopeError> {
        let len = self.len();
        check_range(pos, span, len)?;
        let (left, rest) = ops::split_at(&mut self.arena, self.root, pos as u32);
        let (middle, right) = ops::split_at(&mut self.arena, rest, span as u32);
        ops::free_subtree(&mut self.arena, middle);
        self.root = ops::merge(&mut self.arena, left, right);
        Ok(())
    }

    /// The `span` elements starting at `pos`, in order.
    pub fn read_range(&self, pos: usize, span: usize) -> Result<Vec<T>, RopeError>
    where
        T: Clone,
    {
        check_range(pos, span, self.len())?;
        let mut out = Vec::with_capacity(span);
        collect_range(
            &self.arena,
            self.root,
            pos as u32,
            (pos + span) as u32,
            &mut out,
        );
        Ok(out)
    }

    pub fn get(&self, pos: usize) -> Result<&T, RopeError> {
        u32::try_from(pos + 1)
            .ok()
            .and_then(|k| ops::select(&self.arena, self.root, k))
            .map(|id| &self.arena.get(id).value)
            .ok_or(RopeError::Position {
                pos,
                len: self.len(),
            })
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            inner: ops::InOrder::new(&self.arena, self.root),
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> Default for Rope<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Rope<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut rope = Self::new();
        // Position len is always a valid insertion point.
        let _ = rope.insert_at(0, iter);
        rope
    }
}

pub struct Iter<'a, T> {
    arena: &'a Arena<SeqNode<T>>,
    inner: ops::InOrder<'a, SeqNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|id| &self.arena.get(id).value)
    }
}

pub(crate) fn check_range(pos: usize, span: usize, len: usize) -> Result<(), RopeError> {
    match pos.checked_add(span) {
        Some(end) if end <= len => Ok(()),
        _ => Err(RopeError::Range { pos, span, len }),
    }
}

/// Collect positions `[start, end)` without touching links — a read-only
/// size-guided descent that skips whole subtrees outside the window.
fn collect_range<T: Clone>(
    arena: &Arena<SeqNode<T>>,
    root: Option<NodeId>,
    start: u32,
    end: u32,
    out: &mut Vec<T>,
) {
    let Some(id) = root else { return };
    if start >= end {
        return;
    }
    let node = arena.get(id);
    let left_size = ops::link_size(arena, node.left);
    if start < left_size {
        collect_range(arena, node.left, start, end.min(left_size), out);
    }
    if start <= left_size && left_size < end {
        out.push(node.value.clone());
    }
    if end > left_size + 1 {
        let s = start.saturating_sub(left_size + 1);
        collect_range(arena, node.right, s, end - left_size - 1, out);
    }
}
