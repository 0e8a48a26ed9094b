//! Hash functions and the leaf/internal hashing scheme.
//!
//! Hash domain separation:
//! - Leaf nodes:     `H(0x00 || block)`
//! - Internal nodes: `H(0x01 || left_hash || 0x01 || right_hash)`
//!
//! The tags keep a block from ever hashing to the same input as an internal
//! merge. An internal node with a single child uses that child's hash for
//! both operands.

use std::fmt::Debug;

use sha2::{Digest as _, Sha256};

/// Domain tag prepended to leaf hash inputs.
pub const LEAF_TAG: u8 = 0x00;
/// Domain tag prepended to each child hash of an internal merge.
pub const INTERNAL_TAG: u8 = 0x01;

const LEAF_PREFIX: &[u8] = &[LEAF_TAG];
const INTERNAL_PREFIX: &[u8] = &[INTERNAL_TAG];

/// A cryptographic hash function used to build the tree.
///
/// `hash` must be a pure function of the concatenation of `segments`: every
/// call starts from a fresh state and nothing is retained between calls.
pub trait TreeHasher {
    /// Fixed-length digest produced by the hash function.
    type Digest: AsRef<[u8]> + Clone + Eq + Debug;

    /// Short algorithm name, used for logging and rendering.
    fn name(&self) -> &'static str;

    /// Hash the concatenation of `segments`.
    fn hash(&self, segments: &[&[u8]]) -> Self::Digest;
}

/// Blake3 with a 32-byte output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl TreeHasher for Blake3Hasher {
    type Digest = [u8; 32];

    fn name(&self) -> &'static str {
        "blake3"
    }

    fn hash(&self, segments: &[&[u8]]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        for segment in segments {
            hasher.update(segment);
        }
        *hasher.finalize().as_bytes()
    }
}

/// SHA-256.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl TreeHasher for Sha256Hasher {
    type Digest = [u8; 32];

    fn name(&self) -> &'static str {
        "sha256"
    }

    fn hash(&self, segments: &[&[u8]]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for segment in segments {
            hasher.update(segment);
        }
        hasher.finalize().into()
    }
}

/// Hash a data block into a leaf digest: `H(0x00 || block)`.
pub fn leaf_hash<H: TreeHasher>(hasher: &H, block: &[u8]) -> H::Digest {
    hasher.hash(&[LEAF_PREFIX, block])
}

/// Merge two child digests into their parent digest:
/// `H(0x01 || left || 0x01 || right)`.
pub fn internal_hash<H: TreeHasher>(hasher: &H, left: &H::Digest, right: &H::Digest) -> H::Digest {
    hasher.hash(&[INTERNAL_PREFIX, left.as_ref(), INTERNAL_PREFIX, right.as_ref()])
}

/// Number of bytes `leaf_hash` feeds into the hash function.
pub(crate) fn leaf_input_len(block_len: usize) -> u64 {
    (LEAF_PREFIX.len() + block_len) as u64
}

/// Number of bytes `internal_hash` feeds into the hash function.
pub(crate) fn internal_input_len(left_len: usize, right_len: usize) -> u64 {
    (2 * INTERNAL_PREFIX.len() + left_len + right_len) as u64
}
