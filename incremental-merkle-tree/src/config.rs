//! Construction parameters.

use crate::{Error, Result};

/// Smallest accepted block size in bytes.
pub const MIN_BLOCK_SIZE: usize = 3;

/// Block size used by [`TreeConfig::default`].
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Hard ceiling on the number of blocks (leaves) a tree can hold.
///
/// The node array needs up to twice as many slots as there are leaves, so
/// the ceiling keeps every node index well inside `i32` range.
pub const MAX_BLOCKS: usize = (i32::MAX / 4 - 5) as usize;

/// Parameters fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Maximum length of a data block in bytes.
    pub block_size: usize,
    /// Maximum number of blocks; appends beyond it fail with
    /// [`Error::CapacityExceeded`].
    pub max_blocks: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            max_blocks: MAX_BLOCKS,
        }
    }
}

impl TreeConfig {
    /// Config with the given block size and the default block limit.
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            ..Default::default()
        }
    }

    /// Replace the block size.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Replace the block limit.
    pub fn with_max_blocks(mut self, max_blocks: usize) -> Self {
        self.max_blocks = max_blocks;
        self
    }

    /// Check that the parameters describe a usable tree.
    pub fn validate(&self) -> Result<()> {
        if self.block_size < MIN_BLOCK_SIZE {
            return Err(Error::InvalidConstruction(format!(
                "block size must be at least {}, got {}",
                MIN_BLOCK_SIZE, self.block_size
            )));
        }
        if !(1..=MAX_BLOCKS).contains(&self.max_blocks) {
            return Err(Error::InvalidConstruction(format!(
                "max blocks must be between 1 and {}, got {}",
                MAX_BLOCKS, self.max_blocks
            )));
        }
        Ok(())
    }
}
