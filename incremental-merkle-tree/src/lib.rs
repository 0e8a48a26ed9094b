//! Incrementally updatable binary Merkle tree over a growing byte stream.
//!
//! Appended bytes are cut into blocks of at most `block_size` bytes; each
//! block backs one leaf. Nodes live in a 1-based array (see [`helper`])
//! with all leaves in one row, so the tree is always as shallow as the
//! leaf count allows.
//!
//! Hashing scheme (with [`LEAF_TAG`](hash::LEAF_TAG) = `0x00` and
//! [`INTERNAL_TAG`](hash::INTERNAL_TAG) = `0x01`):
//! - leaf: `H(0x00 || block)`
//! - internal: `H(0x01 || left || 0x01 || right)`, using `left` twice when
//!   there is no right child
//!
//! Appending and updating recompute only the affected paths; appends that
//! outgrow the leaf row move the whole tree down first. Every mutation
//! reports what it did as an [`OperationCost`].
//!
//! ```
//! use incremental_merkle_tree::{IncrementalMerkleTree, Sha256Hasher};
//!
//! let mut tree = IncrementalMerkleTree::new(Sha256Hasher, 5)?;
//! tree.append(&[1, 2, 3, 4, 5, 6, 7]).unwrap()?;
//! assert_eq!(tree.leaf_count(), 2);
//! let before = tree.root_hash()?;
//!
//! tree.update_leaf(0, &[20, 21, 22]).unwrap()?;
//! assert_ne!(tree.root_hash()?, before);
//! # Ok::<(), incremental_merkle_tree::Error>(())
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub mod hash;
pub mod helper;
mod node;
mod tree;
mod verify;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_BLOCK_SIZE, MAX_BLOCKS, MIN_BLOCK_SIZE, TreeConfig};
pub use error::{Error, Result};
pub use hash::{Blake3Hasher, Sha256Hasher, TreeHasher, internal_hash, leaf_hash};
pub use imt_costs::{CostContext, CostResult, CostsExt, OperationCost};
pub use tree::IncrementalMerkleTree;
pub use verify::compute_root;
