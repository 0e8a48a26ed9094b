use imt_visualize::visualize_stdout;
use incremental_merkle_tree::{IncrementalMerkleTree, OperationCost, Sha256Hasher};
use tracing_subscriber::EnvFilter;

fn main() {
    // Log to stderr, filtered by RUST_LOG (e.g. RUST_LOG=incremental_merkle_tree=trace)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // A SHA-256 tree whose blocks hold at most 5 bytes
    let mut tree = IncrementalMerkleTree::new(Sha256Hasher, 5).expect("block size is valid");
    let mut total = OperationCost::default();

    // Seven bytes make one full block and one block of two bytes
    tree.append(&[1, 2, 3, 4, 5, 6, 7])
        .unwrap_add_cost(&mut total)
        .expect("successful first append");
    visualize_stdout(&tree).expect("write to stdout");

    // Two more bytes fit in the second block, no new leaf is created
    tree.append(&[8, 9])
        .unwrap_add_cost(&mut total)
        .expect("successful second append");
    visualize_stdout(&tree).expect("write to stdout");

    // Replace the first block; only its path to the root is rehashed
    tree.update_leaf(0, &[20, 21, 22])
        .unwrap_add_cost(&mut total)
        .expect("successful leaf update");
    visualize_stdout(&tree).expect("write to stdout");

    // The full root, and what the three calls cost together
    let root = tree.root_hash().expect("tree is not empty");
    println!("root: {}", hex::encode(root));
    println!("{total:?}");
}
