//! Full consistency walk over the node array.

use super::IncrementalMerkleTree;
use crate::{
    Error, Result, TreeHasher, compute_root,
    hash::{internal_hash, leaf_hash},
    helper::{left_child, level_of, right_child},
};

impl<H: TreeHasher> IncrementalMerkleTree<H> {
    /// Recompute every stored digest and compare it to what is stored.
    ///
    /// Checks, in order: each leaf against its block, each populated
    /// internal node against its children, the root against
    /// [`compute_root`], and that no slot past the last leaf is populated.
    /// Reports the first offending node as [`Error::InconsistentTree`].
    ///
    /// Linear in the number of nodes; meant for tests and diagnostics.
    pub fn check_consistency(&self) -> Result<()> {
        if self.is_empty() {
            return match self.nodes.iter().position(Option::is_some) {
                Some(index) => Err(Error::InconsistentTree { index }),
                None => Ok(()),
            };
        }

        for (leaf, block) in self.blocks.iter().enumerate() {
            let index = self.leaf_node_index(leaf);
            if self.node_hash(index)? != &leaf_hash(&self.hasher, block.as_slice()) {
                return Err(Error::InconsistentTree { index });
            }
        }

        let leaf_row_start = self.leaf_node_index(0);
        for index in 1..leaf_row_start {
            if !self.is_present(index) {
                continue;
            }
            debug_assert!(level_of(index) < self.leaf_row);
            let left = self.child_hash(left_child(index))?;
            let right = self.child_hash(right_child(index))?;
            let expected = match (left, right) {
                (Some(left), Some(right)) => internal_hash(&self.hasher, left, right),
                (Some(only), None) => internal_hash(&self.hasher, only, only),
                _ => return Err(Error::InconsistentTree { index }),
            };
            if self.node_hash(index)? != &expected {
                return Err(Error::InconsistentTree { index });
            }
        }

        let blocks: Vec<&[u8]> = self.blocks.iter().map(|block| block.as_slice()).collect();
        if self.root_hash()? != compute_root(&self.hasher, &blocks)? {
            return Err(Error::InconsistentTree { index: 1 });
        }

        let leaf_end = self.leaf_node_index(self.leaf_count());
        match (leaf_end..self.nodes.len()).find(|&index| self.is_present(index)) {
            Some(index) => Err(Error::InconsistentTree { index }),
            None => Ok(()),
        }
    }
}
