use split_forest::arena::Arena;
use split_forest::node::{KeyNode, NodeId};
use split_forest::{cow, ops, ForestError};

use crate::error::VersionError;

/// Index into a store's version list.  Version 0 is the empty tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct VersionId(pub u32);

/// Versioned multiset: every mutation derives a new immutable version.
///
/// The arena is append-only here — a slot may be shared by any number of
/// version roots, so nothing is ever freed while the store lives.  Keys
/// must be `Clone` because the cow engine duplicates nodes on the access
/// path.
pub struct VersionStore<K> {
    arena: Arena<KeyNode<K>>,
    versions: Vec<Option<NodeId>>,
}

impl<K: Ord + Clone> VersionStore<K> {
    /// Store whose version 0 is the committed empty tree.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            versions: vec![None],
        }
    }

    /// Seeded variant, for reproducible tree shapes.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            arena: Arena::with_seed(seed),
            versions: vec![None],
        }
    }

    /// Most recently committed version.
    pub fn latest(&self) -> VersionId {
        VersionId((self.versions.len() - 1) as u32)
    }

    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Derives a new version from `base` with `key` inserted.
    pub fn insert(&mut self, base: VersionId, key: K) -> Result<VersionId, VersionError> {
        let root = self.root(base)?;
        let (left, right) = cow::split_by_key_cow(&mut self.arena, root, &key);
        let priority = self.arena.next_priority();
        let node = self.arena.alloc(KeyNode::new(key, priority));
        let merged = cow::merge_cow(&mut self.arena, left, Some(node));
        let new_root = cow::merge_cow(&mut self.arena, merged, right);
        Ok(self.commit(new_root))
    }

    /// Derives a new version from `base` with one occurrence of `key`
    /// removed.  A missing key is a no-op: the new version shares the base
    /// root outright.
    pub fn delete(&mut self, base: VersionId, key: &K) -> Result<VersionId, VersionError> {
        let root = self.root(base)?;
        let (new_root, _removed) = cow::remove_by_key_cow(&mut self.arena, root, key);
        Ok(self.commit(new_root))
    }

    /// Read handle on a committed version.  O(1).
    pub fn checkout(&self, version: VersionId) -> Result<VersionRef<'_, K>, VersionError> {
        Ok(VersionRef {
            store: self,
            root: self.root(version)?,
        })
    }

    pub fn len(&self, version: VersionId) -> Result<usize, VersionError> {
        Ok(self.checkout(version)?.len())
    }

    /// Count of keys strictly less than `key` in `version`.
    pub fn rank(&self, version: VersionId, key: &K) -> Result<usize, VersionError> {
        Ok(self.checkout(version)?.rank(key))
    }

    /// The `k`-th smallest key of `version`, 1-based.
    pub fn select(&self, version: VersionId, k: usize) -> Result<&K, VersionError> {
        let root = self.root(version)?;
        u32::try_from(k)
            .ok()
            .and_then(|k| ops::select(&self.arena, root, k))
            .map(|id| &self.arena.get(id).key)
            .ok_or_else(|| {
                ForestError::OutOfRange {
                    rank: k,
                    len: ops::link_size(&self.arena, root) as usize,
                }
                .into()
            })
    }

    /// Total allocated nodes across all versions (shared nodes counted once).
    pub fn node_count(&self) -> usize {
        self.arena.node_count()
    }

    fn root(&self, version: VersionId) -> Result<Option<NodeId>, VersionError> {
        self.versions
            .get(version.0 as usize)
            .copied()
            .ok_or(VersionError::UnknownVersion(version))
    }

    fn commit(&mut self, root: Option<NodeId>) -> VersionId {
        self.versions.push(root);
        self.latest()
    }
}

impl<K: Ord + Clone> Default for VersionStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable view of one committed version.
pub struct VersionRef<'a, K> {
    store: &'a VersionStore<K>,
    root: Option<NodeId>,
}

impl<'a, K: Ord + Clone> VersionRef<'a, K> {
    pub fn len(&self) -> usize {
        ops::link_size(&self.store.arena, self.root) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Count of keys strictly less than `key`.
    pub fn rank(&self, key: &K) -> usize {
        ops::rank_by_key(&self.store.arena, self.root, key) as usize
    }

    /// The `k`-th smallest key, 1-based.
    pub fn select(&self, k: usize) -> Result<&'a K, ForestError> {
        u32::try_from(k)
            .ok()
            .and_then(|k| ops::select(&self.store.arena, self.root, k))
            .map(|id| &self.store.arena.get(id).key)
            .ok_or(ForestError::OutOfRange {
                rank: k,
                len: self.len(),
            })
    }

    pub fn contains(&self, key: &K) -> bool {
        ops::count_le(&self.store.arena, self.root, key) as usize > self.rank(key)
    }

    /// Sorted snapshot of this version's keys.
    pub fn to_vec(&self) -> Vec<K> {
        ops::InOrder::new(&self.store.arena, self.root)
            .map(|id| self.store.arena.get(id).key.clone())
            .collect()
    }
}
