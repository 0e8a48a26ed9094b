//! Error types for incremental Merkle tree operations.

use thiserror::Error;

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors from tree construction, mutation and queries.
///
/// Every variant except [`Error::InconsistentTree`] is a precondition
/// failure detected before the tree is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The construction parameters are unusable (block size below the
    /// minimum, block limit out of bounds).
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),
    /// Appending would grow the tree past its block limit.
    #[error("capacity exceeded: {requested} blocks requested, at most {max} allowed")]
    CapacityExceeded {
        /// Block count the append would have produced.
        requested: usize,
        /// Configured block limit.
        max: usize,
    },
    /// A leaf update payload is longer than the block size.
    #[error("block of {len} bytes exceeds the block size of {block_size} bytes")]
    OversizedBlock {
        /// Payload length.
        len: usize,
        /// Configured block size.
        block_size: usize,
    },
    /// A leaf index is not below the leaf count.
    #[error("leaf index {index} out of range (leaf count {leaf_count})")]
    OutOfRange {
        /// Requested leaf index.
        index: usize,
        /// Leaf count at the time of the request.
        leaf_count: usize,
    },
    /// The root of a tree without leaves was requested.
    #[error("tree is empty")]
    EmptyTree,
    /// A node that must be present (or hashed) was not.
    #[error("inconsistent tree at node index {index}")]
    InconsistentTree {
        /// 1-based node index of the offending slot.
        index: usize,
    },
}
