//! Text rendering of the tree.

use std::{fmt, io::Write};

use imt_visualize::{DebugBytes, Drawer, Visualize, visualize_to_vec};
use itertools::Itertools;

use super::IncrementalMerkleTree;
use crate::TreeHasher;

impl<H: TreeHasher> Visualize for IncrementalMerkleTree<H> {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> std::io::Result<Drawer<W>> {
        let sizes = self.blocks.iter().map(|block| block.len()).join(",");
        drawer.write(
            format!(
                "MerkleTree of {} data blocks: [{}]; leaf row: {}; nodes:",
                self.leaf_count(),
                sizes,
                self.leaf_row
            )
            .as_bytes(),
        )?;

        drawer.down();
        if self.node_count() == 0 {
            drawer.newline()?;
            drawer.write(b"[]")?;
        }
        for level in 0..=self.leaf_row {
            let slots = self.level_slots(level);
            if slots.is_empty() {
                break;
            }
            let row = slots
                .map(|index| if self.is_present(index) { "." } else { "N" })
                .join(" ");
            drawer.newline()?;
            drawer.write(row.as_bytes())?;
        }
        drawer.up();

        if let Ok(root) = self.root_hash() {
            drawer.newline()?;
            drawer.write(b"root hash: ")?;
            drawer = root.as_ref().visualize(drawer)?;
        }
        Ok(drawer)
    }
}

impl<H: TreeHasher> fmt::Display for IncrementalMerkleTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut v = Vec::new();
        visualize_to_vec(&mut v, self);
        f.write_str(&String::from_utf8_lossy(&v))
    }
}

impl<H: TreeHasher> fmt::Debug for IncrementalMerkleTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncrementalMerkleTree")
            .field("hash", &self.hasher.name())
            .field("config", &self.config)
            .field("leaf_row", &self.leaf_row)
            .field(
                "blocks",
                &self
                    .blocks
                    .iter()
                    .map(|block| DebugBytes(block.as_slice()))
                    .collect::<Vec<_>>(),
            )
            .field("root", &self.root_hash().ok())
            .finish()
    }
}
