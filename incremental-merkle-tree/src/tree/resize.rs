//! Leaf-row relocation.
//!
//! When the leaves no longer fit in row `k`, every existing level is moved
//! `hdiff` levels down so that the old leaf row lands on the new one:
//!
//! ```text
//! before (k = 1)      after relocation to k = 2 (hdiff = 1)
//!
//!       r                       .
//!     a   b                 r       .
//!                         a   b   .   .
//! ```
//!
//! Afterwards index 1 is empty: the old root sits at `2^hdiff` and the tree
//! is in a displaced-root state until `fix_up_range` has rebuilt the path
//! from the new leaves to index 1. Both steps happen inside one `append`
//! call, so the state is never visible outside of it.

use imt_costs::{CostResult, CostsExt, OperationCost, cost_return_on_error_no_add};
use tracing::trace;

use super::IncrementalMerkleTree;
use crate::{Error, TreeHasher, helper::row_start};

impl<H: TreeHasher> IncrementalMerkleTree<H> {
    /// Move every level down to make `new_leaf_row` the leaf row.
    ///
    /// Levels are processed from the old leaf row upwards. A level `l` lands
    /// on level `l + hdiff`, which is either beyond the old tree or a deeper
    /// level that has already been moved out, so no node is overwritten
    /// before it is read. The node array must already be large enough.
    pub(super) fn relocate_leaf_row(&mut self, new_leaf_row: u32) -> CostResult<(), Error> {
        let mut cost = OperationCost::default();
        debug_assert!(new_leaf_row > self.leaf_row);
        let hdiff = new_leaf_row - self.leaf_row;
        trace!(
            from = self.leaf_row,
            to = new_leaf_row,
            hdiff,
            "relocate leaf row"
        );

        for level in (0..=self.leaf_row).rev() {
            let target_start = row_start(level + hdiff);
            for (offset, source) in self.level_slots(level).enumerate() {
                // Levels are filled from the left without gaps.
                let Some(node) = self.nodes[source].take() else {
                    break;
                };
                let target = target_start + offset;
                trace!(source, target, "move node");
                let slot = cost_return_on_error_no_add!(&cost, self.slot_mut(target));
                *slot = Some(node);
                cost.nodes_relocated += 1;
            }
        }

        self.leaf_row = new_leaf_row;
        Ok(()).wrap_with_cost(cost)
    }
}
