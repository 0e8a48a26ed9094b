//! Index arithmetic for the array-packed binary tree.
//!
//! Nodes live in a 1-based array: slot 0 is never used, the root is at 1
//! and node `i` has children `2i` and `2i + 1`. Level `k` occupies the slots
//! `[2^k, 2^(k+1))`.
//!
//! ```text
//!                 1                    level 0
//!         2               3            level 1
//!     4       5       6       7        level 2
//!   8   9  10   11  12  13  14  15     level 3
//! ```

/// Parent of a node. The root's parent is 0, which is never populated.
pub fn parent(index: usize) -> usize {
    index / 2
}

/// Left child of a node.
pub fn left_child(index: usize) -> usize {
    2 * index
}

/// Right child of a node.
pub fn right_child(index: usize) -> usize {
    2 * index + 1
}

/// Returns `true` if `index` is the right child of its parent.
pub fn is_right_child(index: usize) -> bool {
    index % 2 == 1
}

/// First slot of level `level`: `2^level`.
pub fn row_start(level: u32) -> usize {
    1usize << level
}

/// Smallest exponent `k` with `count <= 2^k`; 0 for an empty or single-leaf
/// tree.
pub fn min_exponent(count: usize) -> u32 {
    count.next_power_of_two().trailing_zeros()
}

/// Node index of a 0-based leaf when leaves live at level `leaf_row`.
pub fn leaf_to_node(leaf_row: u32, leaf: usize) -> usize {
    row_start(leaf_row) + leaf
}

/// Level of a 1-based node index.
pub fn level_of(index: usize) -> u32 {
    debug_assert!(index > 0);
    usize::BITS - 1 - index.leading_zeros()
}
