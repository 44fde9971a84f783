//! Order-statistics multiset built on the split/merge engine.

use crate::arena::Arena;
use crate::error::ForestError;
use crate::node::{KeyNode, NodeId};
use crate::ops;

/// Randomized balanced multiset with O(log n) expected insert, delete,
/// rank, and select.
///
/// Duplicate keys are stored as separate nodes; [`delete`](Treap::delete)
/// removes at most one occurrence.  The tree owns its node [`Arena`] and
/// the PRNG that draws priorities, so two trees never share nodes.
pub struct Treap<K> {
    arena: Arena<KeyNode<K>>,
    root: Option<NodeId>,
}

impl<K: Ord> Treap<K> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Tree with a seeded priority PRNG, for reproducible shapes.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            arena: Arena::with_seed(seed),
            root: None,
        }
    }

    /// Builds from a non-decreasing sequence in O(n log n) expected time.
    pub fn from_sorted(keys: Vec<K>) -> Self {
        debug_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        let mut tree = Self::new();
        for key in keys {
            tree.push_max(key);
        }
        tree
    }

    pub fn len(&self) -> usize {
        ops::link_size(&self.arena, self.root) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn insert(&mut self, key: K) {
        let (left, right) = ops::split_by_key(&mut self.arena, self.root, &key);
        let node = self.alloc(key);
        let merged = ops::merge(&mut self.arena, left, Some(node));
        self.root = ops::merge(&mut self.arena, merged, right);
    }

    /// Removes one occurrence of `key`.  Returns `false` (and leaves the
    /// tree unchanged) when the key is absent.
    pub fn delete(&mut self, key: &K) -> bool {
        let (root, removed) = ops::remove_by_key(&mut self.arena, self.root, key);
        self.root = root;
        match removed {
            Some(id) => {
                self.arena.dealloc(id);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.count_le_key(key) > self.rank(key)
    }

    /// Count of keys strictly less than `key`.
    pub fn rank(&self, key: &K) -> usize {
        ops::rank_by_key(&self.arena, self.root, key) as usize
    }

    /// The `k`-th smallest key, 1-based.
    pub fn select(&self, k: usize) -> Result<&K, ForestError> {
        u32::try_from(k)
            .ok()
            .and_then(|k| ops::select(&self.arena, self.root, k))
            .map(|id| &self.arena.get(id).key)
            .ok_or(ForestError::OutOfRange {
                rank: k,
                len: self.len(),
            })
    }

    pub fn first(&self) -> Option<&K> {
        self.select(1).ok()
    }

    pub fn last(&self) -> Option<&K> {
        self.select(self.len()).ok()
    }

    /// Number of keys in `[lo, hi]` (inclusive).  Zero when `hi < lo`.
    pub fn count_range(&self, lo: &K, hi: &K) -> usize {
        if hi < lo {
            return 0;
        }
        self.count_le_key(hi) - self.rank(lo)
    }

    /// In-order (non-decreasing) key iterator.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            arena: &self.arena,
            inner: ops::InOrder::new(&self.arena, self.root),
        }
    }

    /// Splits off everything after the first `n` elements into a new tree.
    ///
    /// `n >= len` leaves `self` untouched and returns an empty tree.  The
    /// split-off elements move into their own arena, so keys are cloned and
    /// their priorities redrawn.
    pub fn split_off_at(&mut self, n: usize) -> Self
    where
        K: Clone,
    {
        let n = u32::try_from(n).unwrap_or(u32::MAX);
        let (left, right) = ops::split_at(&mut self.arena, self.root, n);
        self.root = left;
        let mut out = Self::new();
        for id in ops::InOrder::new(&self.arena, right) {
            let key = self.arena.get(id).key.clone();
            out.push_max(key);
        }
        ops::free_subtree(&mut self.arena, right);
        out
    }

    /// Appends `other`, consuming it.
    ///
    /// Precondition: every key of `self` is ≤ every key of `other`.
    /// Violating it breaks the BST invariant; checked only in debug builds
    /// because a full check costs O(n).
    pub fn append(&mut self, other: Self) {
        debug_assert!(match (self.last(), other.first()) {
            (Some(a), Some(b)) => a <= b,
            _ => true,
        });
        for key in other.into_sorted_vec() {
            self.push_max(key);
        }
    }

    /// Consumes the tree into its sorted key sequence.
    pub fn into_sorted_vec(self) -> Vec<K> {
        let order: Vec<NodeId> = ops::InOrder::new(&self.arena, self.root).collect();
        let mut slots: Vec<Option<KeyNode<K>>> =
            self.arena.into_nodes().into_iter().map(Some).collect();
        order
            .into_iter()
            .map(|id| {
                slots[id.index()]
                    .take()
                    .expect("in-order ids are distinct")
                    .key
            })
            .collect()
    }

    /// Structural self-check used by tests: cached sizes are consistent and
    /// the in-order key sequence is non-decreasing.
    pub fn is_well_formed(&self) -> bool {
        if !ops::check_sizes(&self.arena, self.root) {
            return false;
        }
        let mut prev: Option<&K> = None;
        for id in ops::InOrder::new(&self.arena, self.root) {
            let key = &self.arena.get(id).key;
            if prev.is_some_and(|p| p > key) {
                return false;
            }
            prev = Some(key);
        }
        true
    }

    fn alloc(&mut self, key: K) -> NodeId {
        let priority = self.arena.next_priority();
        self.arena.alloc(KeyNode::new(key, priority))
    }

    /// Merge a key known to be ≥ everything in the tree onto the right end.
    fn push_max(&mut self, key: K) {
        let node = self.alloc(key);
        self.root = ops::merge(&mut self.arena, self.root, Some(node));
    }

    fn count_le_key(&self, key: &K) -> usize {
        ops::count_le(&self.arena, self.root, key) as usize
    }
}

impl<K: Ord> Default for Treap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<K> for Treap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        for key in iter {
            tree.insert(key);
        }
        tree
    }
}

pub struct Iter<'a, K> {
    arena: &'a Arena<KeyNode<K>>,
    inner: ops::InOrder<'a, KeyNode<K>>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|id| &self.arena.get(id).key)
    }
}
