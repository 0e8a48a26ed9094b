//! Bottom-up recomputation of internal digests after leaves change.

use imt_costs::{
    CostResult, CostsExt, OperationCost, cost_return_on_error, cost_return_on_error_no_add,
};
use tracing::trace;

use super::IncrementalMerkleTree;
use crate::{
    Error, TreeHasher,
    helper::{is_right_child, parent},
    node::Node,
};

impl<H: TreeHasher> IncrementalMerkleTree<H> {
    /// Recompute every ancestor of node `index`, ending with the root.
    ///
    /// One internal hash per level, used after a single leaf changed.
    pub(super) fn fix_up_path(&mut self, index: usize) -> CostResult<(), Error> {
        let mut cost = OperationCost::default();
        trace!(index, "fix up path");
        let mut current = parent(index);
        while current >= 1 {
            cost_return_on_error!(&mut cost, self.rehash_internal(current));
            current = parent(current);
        }
        Ok(()).wrap_with_cost(cost)
    }

    /// Recompute the ancestors of the contiguous node range `[from, to)`
    /// level by level, allocating missing parent slots on the way.
    ///
    /// Each parent is hashed exactly once: when its right child is visited,
    /// or when its left child is the last node of the range. A parent whose
    /// left child lies before `from` reuses the digest already stored there.
    ///
    /// Works while the root is displaced by a relocation: the ascent stops
    /// only once the range has reached index 1.
    pub(super) fn fix_up_range(&mut self, mut from: usize, mut to: usize) -> CostResult<(), Error> {
        let mut cost = OperationCost::default();
        while from < to && from > 1 {
            trace!(from, to, "fix up range");
            for index in from..to {
                let parent_index = parent(index);
                let slot = cost_return_on_error_no_add!(&cost, self.slot_mut(parent_index));
                slot.get_or_insert_with(Node::pending);
                if is_right_child(index) || index + 1 == to {
                    cost_return_on_error!(&mut cost, self.rehash_internal(parent_index));
                }
            }
            // The last parent stays in range even when `to - 1` is a left
            // child.
            from = parent(from);
            to = parent(to - 1) + 1;
        }
        Ok(()).wrap_with_cost(cost)
    }
}
