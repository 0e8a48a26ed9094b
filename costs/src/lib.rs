#![deny(missing_docs)]
//! Cost accounting for incremental Merkle tree operations.
//!
//! Every mutating tree operation reports how much hashing and node-array
//! work it did through an [`OperationCost`] wrapped together with the
//! operation's result in a [`CostContext`].

pub mod context;

use std::ops::{Add, AddAssign};

pub use context::{CostContext, CostResult, CostsExt};

/// Piece of data representing the work done by a tree operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many leaf digests were computed.
    pub hash_leaf_calls: u32,
    /// How many internal node digests were computed.
    pub hash_node_calls: u32,
    /// How many bytes were fed into the hash function.
    pub hashed_bytes: u64,
    /// How many nodes were moved to a deeper level by a leaf-row relocation.
    pub nodes_relocated: u32,
    /// How many slots were added to the node array.
    pub nodes_allocated: u32,
}

impl OperationCost {
    /// Returns `true` if no work was recorded.
    pub fn is_nothing(&self) -> bool {
        self == &Self::default()
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        OperationCost {
            hash_leaf_calls: self.hash_leaf_calls + rhs.hash_leaf_calls,
            hash_node_calls: self.hash_node_calls + rhs.hash_node_calls,
            hashed_bytes: self.hashed_bytes + rhs.hashed_bytes,
            nodes_relocated: self.nodes_relocated + rhs.nodes_relocated,
            nodes_allocated: self.nodes_allocated + rhs.nodes_allocated,
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.hash_leaf_calls += rhs.hash_leaf_calls;
        self.hash_node_calls += rhs.hash_node_calls;
        self.hashed_bytes += rhs.hashed_bytes;
        self.nodes_relocated += rhs.nodes_relocated;
        self.nodes_allocated += rhs.nodes_allocated;
    }
}
