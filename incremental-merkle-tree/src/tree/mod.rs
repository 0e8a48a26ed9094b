//! The incremental Merkle tree.
//!
//! Blocks and nodes are kept side by side:
//! - `blocks` is the 0-based sequence of data blocks, one per leaf
//! - `nodes` is the 1-based node array (see [`crate::helper`]) whose leaf row
//!   starts at `2^leaf_row`
//!
//! Mutations touch the blocks first and then bring every affected ancestor
//! digest up to date, so after any public call returns each internal node
//! holds the hash of its children and index 1 holds the root.

mod append;
mod check;
mod fixup;
mod resize;
mod visualize;

use imt_costs::{CostContext, CostResult, CostsExt, OperationCost, cost_return_on_error_no_add};
use tracing::{debug, info};

use crate::{
    Error, Result, TreeConfig, TreeHasher,
    hash::{internal_hash, internal_input_len, leaf_hash, leaf_input_len},
    helper::{leaf_to_node, left_child, right_child, row_start},
    node::{DataBlock, Node},
};

/// An array-packed binary Merkle tree over a growing sequence of blocks.
///
/// Supports two mutations: [`append`](Self::append) adds bytes at the end
/// (first topping up the last block, then creating new blocks), and
/// [`update_leaf`](Self::update_leaf) replaces the content of one block.
/// Both recompute only the digests that changed.
///
/// Not meant to be mutated from several threads at once; wrap it in a lock
/// if it has to be shared.
pub struct IncrementalMerkleTree<H: TreeHasher> {
    hasher: H,
    config: TreeConfig,
    blocks: Vec<DataBlock>,
    /// Slot 0 is never populated.
    nodes: Vec<Option<Node<H::Digest>>>,
    leaf_row: u32,
}

impl<H: TreeHasher> IncrementalMerkleTree<H> {
    /// Create an empty tree with the given block size and the default block
    /// limit.
    ///
    /// Fails with [`Error::InvalidConstruction`] if `block_size` is below
    /// [`MIN_BLOCK_SIZE`](crate::MIN_BLOCK_SIZE).
    pub fn new(hasher: H, block_size: usize) -> Result<Self> {
        Self::with_config(hasher, TreeConfig::new(block_size))
    }

    /// Create an empty tree from a full config.
    pub fn with_config(hasher: H, config: TreeConfig) -> Result<Self> {
        config.validate()?;
        info!(
            block_size = config.block_size,
            max_blocks = config.max_blocks,
            hash = hasher.name(),
            "created incremental merkle tree"
        );
        Ok(Self {
            hasher,
            config,
            blocks: Vec::new(),
            nodes: vec![None],
            leaf_row: 0,
        })
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Number of leaves, equal to the number of data blocks.
    pub fn leaf_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Root digest, read from node index 1.
    ///
    /// Returns [`Error::EmptyTree`] if there are no leaves.
    pub fn root_hash(&self) -> Result<H::Digest> {
        if self.is_empty() {
            return Err(Error::EmptyTree);
        }
        self.node_hash(1).cloned()
    }

    /// Content of the block behind leaf `index`.
    pub fn block(&self, index: usize) -> Option<&[u8]> {
        self.blocks.get(index).map(DataBlock::as_slice)
    }

    /// Digest of leaf `index`, `None` if there is no such leaf.
    ///
    /// A leaf slot without a digest is reported as
    /// [`Error::InconsistentTree`], not as a missing leaf.
    pub fn leaf_hash_at(&self, index: usize) -> Result<Option<H::Digest>> {
        if index >= self.leaf_count() {
            return Ok(None);
        }
        self.node_hash(self.leaf_node_index(index))
            .map(|hash| Some(hash.clone()))
    }

    /// Exponent `k` of the leaf row: leaves live at node indices
    /// `[2^k, 2^k + leaf_count)`.
    pub fn leaf_row_exponent(&self) -> u32 {
        self.leaf_row
    }

    /// Number of slots in the node array, not counting slot 0.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Maximum block length in bytes.
    pub fn block_size(&self) -> usize {
        self.config.block_size
    }

    /// Maximum number of blocks.
    pub fn max_blocks(&self) -> usize {
        self.config.max_blocks
    }

    /// The construction parameters.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The hash function.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    // ── Leaf update ─────────────────────────────────────────────────────

    /// Replace the content of leaf `index` with `data` and update the path
    /// up to the root.
    ///
    /// Unlike [`append`](Self::append) the old content is discarded, not
    /// extended. Costs one leaf hash plus one internal hash per level.
    ///
    /// Fails with [`Error::OversizedBlock`] if `data` is longer than the
    /// block size and with [`Error::OutOfRange`] if there is no such leaf;
    /// the tree is left untouched in both cases.
    pub fn update_leaf(&mut self, index: usize, data: &[u8]) -> CostResult<(), Error> {
        let cost = OperationCost::default();
        if data.len() > self.block_size() {
            return Err(Error::OversizedBlock {
                len: data.len(),
                block_size: self.block_size(),
            })
            .wrap_with_cost(cost);
        }
        if index >= self.leaf_count() {
            return Err(Error::OutOfRange {
                index,
                leaf_count: self.leaf_count(),
            })
            .wrap_with_cost(cost);
        }
        debug!(index, len = data.len(), "update leaf");

        self.blocks[index].replace(data);
        self.rehash_leaf(index)
            .flat_map_ok(|node_index| self.fix_up_path(node_index))
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn leaf_node_index(&self, leaf: usize) -> usize {
        leaf_to_node(self.leaf_row, leaf)
    }

    /// Digest stored at a node that must be present and hashed.
    fn node_hash(&self, index: usize) -> Result<&H::Digest> {
        self.nodes
            .get(index)
            .and_then(Option::as_ref)
            .and_then(|node| node.hash.as_ref())
            .ok_or(Error::InconsistentTree { index })
    }

    /// Digest of a child slot: `None` if the slot is absent, an error if it
    /// is present but was never hashed.
    fn child_hash(&self, index: usize) -> Result<Option<&H::Digest>> {
        match self.nodes.get(index) {
            Some(Some(node)) => node
                .hash
                .as_ref()
                .map(Some)
                .ok_or(Error::InconsistentTree { index }),
            _ => Ok(None),
        }
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Option<Node<H::Digest>>> {
        self.nodes
            .get_mut(index)
            .ok_or(Error::InconsistentTree { index })
    }

    /// Hash block `leaf` into its leaf node (under the current leaf row) and
    /// return the node index. Ancestors are not touched.
    fn rehash_leaf(&mut self, leaf: usize) -> CostResult<usize, Error> {
        let index = self.leaf_node_index(leaf);
        let block = self.blocks[leaf].as_slice();
        let cost = OperationCost {
            hash_leaf_calls: 1,
            hashed_bytes: leaf_input_len(block.len()),
            ..Default::default()
        };
        let hash = leaf_hash(&self.hasher, block);
        let slot = cost_return_on_error_no_add!(&cost, self.slot_mut(index));
        *slot = Some(Node::with_hash(hash));
        Ok(index).wrap_with_cost(cost)
    }

    /// Recompute the digest of internal node `index` from its children,
    /// duplicating the only child when the other one is absent.
    fn rehash_internal(&mut self, index: usize) -> CostResult<(), Error> {
        let cost = OperationCost::default();
        let left = cost_return_on_error_no_add!(&cost, self.child_hash(left_child(index)));
        let right = cost_return_on_error_no_add!(&cost, self.child_hash(right_child(index)));
        let (left, right) = match (left, right) {
            (Some(left), Some(right)) => (left, right),
            (Some(only), None) | (None, Some(only)) => (only, only),
            (None, None) => {
                return Err(Error::InconsistentTree {
                    index: left_child(index),
                })
                .wrap_with_cost(cost);
            }
        };
        let cost = OperationCost {
            hash_node_calls: 1,
            hashed_bytes: internal_input_len(left.as_ref().len(), right.as_ref().len()),
            ..Default::default()
        };
        let hash = internal_hash(&self.hasher, left, right);
        let slot = cost_return_on_error_no_add!(&cost, self.slot_mut(index));
        *slot = Some(Node::with_hash(hash));
        Ok(()).wrap_with_cost(cost)
    }

    /// Extend the node array with absent slots up to `len` slots in total
    /// (slot 0 included). Never shrinks.
    fn grow_nodes(&mut self, len: usize) -> CostContext<()> {
        let added = len.saturating_sub(self.nodes.len());
        if added > 0 {
            self.nodes.resize_with(len, || None);
        }
        ().wrap_with_cost(OperationCost {
            nodes_allocated: added as u32,
            ..Default::default()
        })
    }

    /// Whether the slot at `index` is populated.
    fn is_present(&self, index: usize) -> bool {
        matches!(self.nodes.get(index), Some(Some(_)))
    }

    /// Slots of level `level` that exist in the node array.
    fn level_slots(&self, level: u32) -> std::ops::Range<usize> {
        let start = row_start(level).min(self.nodes.len());
        let end = row_start(level + 1).min(self.nodes.len());
        start..end
    }
}
