//! Append logic for the incremental Merkle tree.

use imt_costs::{CostResult, CostsExt, OperationCost, cost_return_on_error};
use tracing::debug;

use super::IncrementalMerkleTree;
use crate::{
    Error, TreeHasher,
    helper::{min_exponent, row_start},
    node::DataBlock,
};

/// How an append splits its input over existing and new blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AppendPlan {
    /// Bytes that go into the last, partially filled block.
    fill: usize,
    /// Number of blocks created for the rest.
    new_blocks: usize,
    /// Block count after the append.
    total_blocks: usize,
    /// Leaf row exponent after the append.
    leaf_row: u32,
}

impl AppendPlan {
    fn new(data_len: usize, block_count: usize, last_block_free: usize, block_size: usize) -> Self {
        let fill = last_block_free.min(data_len);
        let new_blocks = (data_len - fill).div_ceil(block_size);
        let total_blocks = block_count + new_blocks;
        AppendPlan {
            fill,
            new_blocks,
            total_blocks,
            leaf_row: min_exponent(total_blocks),
        }
    }
}

impl<H: TreeHasher> IncrementalMerkleTree<H> {
    /// Append `data` at the end of the block sequence.
    ///
    /// The last block is topped up first; the remaining bytes are cut into
    /// new blocks of `block_size` bytes (the final one possibly shorter).
    /// If the new leaves do not fit in the current leaf row the whole tree is
    /// moved one or more levels down before they are laid out.
    ///
    /// Empty input is a no-op. Fails with [`Error::CapacityExceeded`],
    /// leaving the tree untouched, if the block count would pass
    /// `max_blocks`.
    pub fn append(&mut self, data: &[u8]) -> CostResult<(), Error> {
        let cost = OperationCost::default();
        if data.is_empty() {
            return Ok(()).wrap_with_cost(cost);
        }

        let old_blocks = self.leaf_count();
        let free = self
            .blocks
            .last()
            .map_or(0, |block| self.block_size() - block.len());
        let plan = AppendPlan::new(data.len(), old_blocks, free, self.block_size());
        if plan.total_blocks > self.max_blocks() {
            return Err(Error::CapacityExceeded {
                requested: plan.total_blocks,
                max: self.max_blocks(),
            })
            .wrap_with_cost(cost);
        }
        debug!(
            len = data.len(),
            old_blocks,
            fill = plan.fill,
            new_blocks = plan.new_blocks,
            leaf_row = plan.leaf_row,
            "append"
        );

        self.append_planned(data, plan)
    }

    fn append_planned(&mut self, data: &[u8], plan: AppendPlan) -> CostResult<(), Error> {
        let mut cost = OperationCost::default();
        let old_blocks = self.leaf_count();
        self.grow_nodes(row_start(plan.leaf_row) + plan.total_blocks)
            .unwrap_add_cost(&mut cost);
        if plan.leaf_row > self.leaf_row {
            // displaced root until the fix-up below completes
            cost_return_on_error!(&mut cost, self.relocate_leaf_row(plan.leaf_row));
        }

        // First node whose ancestors need recomputing.
        let mut dirty_from = self.leaf_node_index(old_blocks);
        let (head, rest) = data.split_at(plan.fill);
        if !head.is_empty() {
            let last = old_blocks - 1;
            self.blocks[last].extend(head);
            dirty_from = cost_return_on_error!(&mut cost, self.rehash_leaf(last));
        }

        self.blocks.reserve(plan.new_blocks);
        for chunk in rest.chunks(self.block_size()) {
            self.blocks.push(DataBlock::from(chunk));
            cost_return_on_error!(&mut cost, self.rehash_leaf(self.blocks.len() - 1));
        }

        let fix_up = if plan.new_blocks == 0 {
            // only the last block grew, its position did not change
            self.fix_up_path(dirty_from)
        } else {
            let dirty_to = self.leaf_node_index(plan.total_blocks);
            self.fix_up_range(dirty_from, dirty_to)
        };
        fix_up.add_cost(cost)
    }
}
