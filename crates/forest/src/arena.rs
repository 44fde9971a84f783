//! `Vec`-backed node pool.
//!
//! The arena owns every node of the trees built over it, plus the PRNG that
//! draws node priorities.  Priorities come from a seeded xoshiro256** so
//! tree shapes are reproducible when a seed is supplied.
//!
//! Freed slots are recycled through a free list.  The persistence layer
//! never frees: a slot may be shared by any number of version roots, so its
//! arena only grows.

use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::node::NodeId;

pub struct Arena<N> {
    nodes: Vec<N>,
    free: Vec<NodeId>,
    rng: Xoshiro256StarStar,
}

impl<N> Arena<N> {
    /// Arena with an OS-entropy seed.
    pub fn new() -> Self {
        Self::with_seed(OsRng.next_u64())
    }

    /// Arena with a fixed seed, for reproducible tree shapes.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// Draws the random priority for the next node.
    #[inline]
    pub fn next_priority(&mut self) -> u64 {
        self.rng.next_u64()
    }

    pub fn alloc(&mut self, node: N) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = node;
                id
            }
            None => {
                let id = NodeId(self.nodes.len() as u32);
                self.nodes.push(node);
                id
            }
        }
    }

    /// Returns `id`'s slot to the free list.  The caller must ensure no
    /// live tree still links to it.
    pub fn dealloc(&mut self, id: NodeId) {
        self.free.push(id);
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &N {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut N {
        &mut self.nodes[id.index()]
    }

    /// Number of live (allocated, not freed) nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub(crate) fn into_nodes(self) -> Vec<N> {
        self.nodes
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}
