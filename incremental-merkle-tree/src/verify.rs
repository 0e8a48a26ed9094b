//! Root computation from scratch.

use crate::{
    Error, Result, TreeHasher,
    hash::{internal_hash, leaf_hash},
};

/// Compute the root digest of `blocks` without an incremental tree.
///
/// Every block is hashed into a leaf, then each level is folded pairwise
/// into the next one. An odd node out is paired with itself. Returns
/// [`Error::EmptyTree`] when there are no blocks.
///
/// Runs in linear time and allocates one level at a time; used as the
/// reference for the incremental tree.
pub fn compute_root<H, B>(hasher: &H, blocks: &[B]) -> Result<H::Digest>
where
    H: TreeHasher,
    B: AsRef<[u8]>,
{
    let mut level: Vec<H::Digest> = blocks
        .iter()
        .map(|block| leaf_hash(hasher, block.as_ref()))
        .collect();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| internal_hash(hasher, &pair[0], pair.get(1).unwrap_or(&pair[0])))
            .collect();
    }
    level.pop().ok_or(Error::EmptyTree)
}
