//! Node model shared by every tree in the workspace.
//!
//! Instead of raw pointers, all links are `Option<NodeId>` indices into a
//! caller-owned [`Arena`](crate::arena::Arena).  Tree-manipulation functions
//! take the arena plus node ids and work with indices throughout.

use crate::arena::Arena;

/// Index of a node inside an [`Arena`](crate::arena::Arena).
///
/// `None` stands for the empty subtree wherever a link is optional.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Link, size, and priority accessors required by the split/merge engine.
///
/// `priority` is an independently drawn random value; the engine maintains a
/// max-heap on it (higher priority wins the root in a merge) and never
/// compares it against keys.  `size` caches the subtree node count and is
/// recomputed bottom-up after every structural change.
pub trait TreapNode: Sized {
    fn left(&self) -> Option<NodeId>;
    fn right(&self) -> Option<NodeId>;
    fn set_left(&mut self, v: Option<NodeId>);
    fn set_right(&mut self, v: Option<NodeId>);
    fn size(&self) -> u32;
    fn set_size(&mut self, v: u32);
    fn priority(&self) -> u64;

    /// Resolve any pending lazy tag on `id` before its children are read.
    ///
    /// Called at the top of every recursive split/merge descent, so that a
    /// node's tag is always empty once a function hands out one of its
    /// children.  Tag-free node types keep the default no-op.
    fn push_down(_arena: &mut Arena<Self>, _id: NodeId) {}
}

/// Extension for nodes carrying an ordered key (BST invariant holds).
pub trait KeyedNode: TreapNode {
    type Key: Ord;

    fn key(&self) -> &Self::Key;
}

/// Plain keyed node used by [`Treap`](crate::tree::Treap) and the
/// persistence layer.  No lazy tag.
#[derive(Clone, Debug)]
pub struct KeyNode<K> {
    pub key: K,
    pub priority: u64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub size: u32,
}

impl<K> KeyNode<K> {
    pub fn new(key: K, priority: u64) -> Self {
        Self {
            key,
            priority,
            left: None,
            right: None,
            size: 1,
        }
    }
}

impl<K> TreapNode for KeyNode<K> {
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

impl<K: Ord> KeyedNode for KeyNode<K> {
    type Key = K;

    #[inline]
    fn key(&self) -> &K {
        &self.key
    }
}
