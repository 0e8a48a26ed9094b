use assert_matches::assert_matches;

use super::*;

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn sha_tree(block_size: usize) -> IncrementalMerkleTree<Sha256Hasher> {
    init_logging();
    IncrementalMerkleTree::new(Sha256Hasher, block_size).expect("valid block size")
}

fn root_hex<H: TreeHasher>(tree: &IncrementalMerkleTree<H>) -> String {
    hex::encode(tree.root_hash().expect("non-empty tree"))
}

fn all_blocks<H: TreeHasher>(tree: &IncrementalMerkleTree<H>) -> Vec<Vec<u8>> {
    (0..tree.leaf_count())
        .map(|i| tree.block(i).expect("block in range").to_vec())
        .collect()
}

// ── Construction ─────────────────────────────────────────────────────

#[test]
fn test_construction_block_size_boundary() {
    assert!(IncrementalMerkleTree::new(Sha256Hasher, 3).is_ok());
    assert_matches!(
        IncrementalMerkleTree::new(Sha256Hasher, 2),
        Err(Error::InvalidConstruction(_))
    );
    assert_matches!(
        IncrementalMerkleTree::with_config(Blake3Hasher, TreeConfig::new(8).with_max_blocks(0)),
        Err(Error::InvalidConstruction(_))
    );
}

#[test]
fn test_empty_tree() {
    let tree = sha_tree(5);
    assert!(tree.is_empty());
    assert_eq!(tree.leaf_count(), 0);
    assert_eq!(tree.root_hash(), Err(Error::EmptyTree));
    assert_eq!(tree.block(0), None);
    assert_eq!(tree.leaf_hash_at(0), Ok(None));
    assert_eq!(tree.block_size(), 5);
    assert_eq!(tree.max_blocks(), MAX_BLOCKS);
    assert_eq!(tree.hasher().name(), "sha256");
}

// ── Pinned vectors ───────────────────────────────────────────────────

#[test]
fn test_block_size_five_session() {
    let mut tree = sha_tree(5);

    tree.append(&[1, 2, 3, 4, 5, 6, 7]).unwrap().expect("append");
    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.block(0), Some([1, 2, 3, 4, 5].as_slice()));
    assert_eq!(tree.block(1), Some([6, 7].as_slice()));
    assert_eq!(
        root_hex(&tree),
        "f16a90becd1fb59e19e7294e2fc0f549bba07bec57932ab482b2e88c56d84964"
    );

    tree.append(&[8, 9]).unwrap().expect("append");
    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.block(1), Some([6, 7, 8, 9].as_slice()));
    assert_eq!(
        root_hex(&tree),
        "23fe91c8398c7a228f2c35a0b9021257f38907d3932ff3e808c61c0c836976b7"
    );

    tree.update_leaf(0, &[20, 21, 22]).unwrap().expect("update");
    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.block(0), Some([20, 21, 22].as_slice()));
    assert_eq!(
        root_hex(&tree),
        "ee6cd779efc6f2b256af3a649d7ec2fa3991cd287cdba9cf119f44c9bf83f289"
    );
    tree.check_consistency().expect("consistent");
}

#[test]
fn test_block_size_three_session() {
    let mut tree = sha_tree(3);
    let data: Vec<u8> = (1..=20).collect();

    tree.append(&data).unwrap().expect("append");
    assert_eq!(tree.leaf_count(), 7);
    assert_eq!(tree.leaf_row_exponent(), 3);
    assert_eq!(tree.block(6), Some([19, 20].as_slice()));
    assert_eq!(
        root_hex(&tree),
        "257430c9dc285855d7c5297172e40c7bfdcde80f17a6e65efa5630078cd50969"
    );

    tree.append(&[8, 9]).unwrap().expect("append");
    assert_eq!(tree.leaf_count(), 8);
    assert_eq!(tree.block(6), Some([19, 20, 8].as_slice()));
    assert_eq!(tree.block(7), Some([9].as_slice()));
    assert_eq!(
        root_hex(&tree),
        "43697f42a670936e3ed6c1f8cd83869c3e0640243384b49574bea24d2575fb4a"
    );
    tree.check_consistency().expect("consistent");
}

#[test]
fn test_single_leaf_root_is_leaf_hash() {
    let mut tree = sha_tree(5);
    tree.append(&[1, 2, 3]).unwrap().expect("append");
    assert_eq!(tree.leaf_row_exponent(), 0);
    assert_eq!(tree.node_count(), 1);
    assert_eq!(
        root_hex(&tree),
        "054edec1d0211f624fed0cbca9d4f9400b0e491c43742af2c5b0abebf0c990d8"
    );
    assert_eq!(tree.leaf_hash_at(0), Ok(tree.root_hash().ok()));
}

#[test]
fn test_growing_four_to_five_leaves_sets_root() {
    let mut tree = sha_tree(3);
    let data: Vec<u8> = (1..=15).collect();

    tree.append(&data[..12]).unwrap().expect("append");
    assert_eq!(tree.leaf_count(), 4);
    assert_eq!(
        root_hex(&tree),
        "e8d91d75392b33b90d30bf7bc4d3bcf2de9d65b6f5171eb003f32c80a03b8220"
    );

    tree.append(&data[12..]).unwrap().expect("append");
    assert_eq!(tree.leaf_count(), 5);
    assert_eq!(tree.leaf_row_exponent(), 3);
    assert_eq!(
        root_hex(&tree),
        "1bfe662331de506289028eebc2dd099ea3f1ed9872e863bf6a575af2e55caf2a"
    );
    assert_eq!(
        tree.root_hash(),
        compute_root(&Sha256Hasher, &all_blocks(&tree))
    );
    tree.check_consistency().expect("consistent");
}

// ── Preconditions ────────────────────────────────────────────────────

#[test]
fn test_update_size_limit() {
    let mut tree = sha_tree(5);
    tree.append(&[0; 12]).unwrap().expect("append");

    tree.update_leaf(1, &[9; 5]).unwrap().expect("exactly block size");
    let before = tree.root_hash();
    assert_eq!(
        tree.update_leaf(1, &[9; 6]).unwrap(),
        Err(Error::OversizedBlock {
            len: 6,
            block_size: 5,
        })
    );
    assert_eq!(tree.root_hash(), before);
    assert_eq!(tree.block(1), Some([9; 5].as_slice()));
}

#[test]
fn test_update_out_of_range_leaves_tree_unchanged() {
    let mut tree = sha_tree(5);
    assert_matches!(
        tree.update_leaf(0, &[1]).unwrap(),
        Err(Error::OutOfRange {
            index: 0,
            leaf_count: 0,
        })
    );

    tree.append(&[0; 7]).unwrap().expect("append");
    let before = tree.root_hash();
    let result = tree.update_leaf(2, &[1]);
    assert!(result.cost.is_nothing());
    assert_matches!(result.value, Err(Error::OutOfRange { index: 2, .. }));
    assert_eq!(tree.root_hash(), before);
}

#[test]
fn test_capacity_is_checked_before_mutation() {
    init_logging();
    let config = TreeConfig::new(4).with_max_blocks(3);
    let mut tree = IncrementalMerkleTree::with_config(Sha256Hasher, config).expect("valid config");

    tree.append(&[1; 10]).unwrap().expect("three blocks fit");
    let before = tree.root_hash();
    let nodes = tree.node_count();

    // fills the last block but needs a fourth one
    let result = tree.append(&[2; 3]);
    assert!(result.cost.is_nothing());
    assert_eq!(
        result.value,
        Err(Error::CapacityExceeded {
            requested: 4,
            max: 3,
        })
    );
    assert_eq!(tree.root_hash(), before);
    assert_eq!(tree.node_count(), nodes);
    assert_eq!(tree.block(2), Some([1, 1].as_slice()));

    // filling the last block without a new one is still fine
    tree.append(&[2; 2]).unwrap().expect("fits in the last block");
    assert_eq!(tree.block(2), Some([1, 1, 2, 2].as_slice()));
}

// ── Costs ────────────────────────────────────────────────────────────

#[test]
fn test_empty_append_is_free() {
    let mut tree = sha_tree(5);
    let result = tree.append(&[]);
    assert!(result.cost.is_nothing());
    assert_eq!(result.value, Ok(()));
    assert!(tree.is_empty());

    tree.append(&[1; 9]).unwrap().expect("append");
    let before = tree.root_hash();
    assert!(tree.append(&[]).cost().is_nothing());
    assert_eq!(tree.root_hash(), before);
}

#[test]
fn test_update_costs_one_hash_per_level() {
    let mut tree = sha_tree(4);
    tree.append(&[0; 4 * 11]).unwrap().expect("append");
    assert_eq!(tree.leaf_row_exponent(), 4);

    let cost = tree.update_leaf(7, &[1, 2]).cost;
    assert_eq!(cost.hash_leaf_calls, 1);
    assert_eq!(cost.hash_node_calls, 4);
    assert_eq!(cost.hashed_bytes, 3 + 4 * 66);
    assert_eq!(cost.nodes_relocated, 0);
    assert_eq!(cost.nodes_allocated, 0);
}

#[test]
fn test_fill_only_append_costs_like_update() {
    let mut tree = sha_tree(4);
    tree.append(&[0; 4 * 10 + 1]).unwrap().expect("append");
    assert_eq!(tree.leaf_count(), 11);

    let cost = tree.append(&[5, 6]).cost;
    assert_eq!(
        cost,
        OperationCost {
            hash_leaf_calls: 1,
            hash_node_calls: 4,
            hashed_bytes: 4 + 4 * 66,
            ..Default::default()
        }
    );
    assert_eq!(tree.block(10), Some([0, 5, 6].as_slice()));
}

#[test]
fn test_relocation_cost() {
    let mut tree = sha_tree(3);
    tree.append(&[0; 12]).unwrap().expect("append");
    assert_eq!(tree.node_count(), 7);

    let cost = tree.append(&[1]).cost;
    // 4 leaves, 2 internal nodes, 1 root
    assert_eq!(cost.nodes_relocated, 7);
    assert_eq!(cost.nodes_allocated, 5);
    assert_eq!(cost.hash_leaf_calls, 1);
    // nodes 6, 3 and 1
    assert_eq!(cost.hash_node_calls, 3);
    assert_eq!(tree.node_count(), 12);
}

#[test]
fn test_costs_accumulate_across_calls() {
    let mut tree = sha_tree(3);
    let mut total = OperationCost::default();
    tree.append(&[1; 7]).unwrap_add_cost(&mut total).expect("append");
    tree.update_leaf(0, &[2]).unwrap_add_cost(&mut total).expect("update");
    assert_eq!(total.hash_leaf_calls, 3 + 1);
    assert_eq!(total.hash_node_calls, 3 + 2);
}

// ── Incremental behaviour ────────────────────────────────────────────

#[test]
fn test_incremental_appends_match_full_recompute() {
    let mut tree = sha_tree(3);
    for i in 1..=40u8 {
        tree.append(&[i, i.wrapping_mul(7), 0]).unwrap().expect("append");
        assert_eq!(tree.leaf_count(), i as usize);
        assert_eq!(
            tree.leaf_row_exponent(),
            helper::min_exponent(tree.leaf_count())
        );
        assert_eq!(
            tree.root_hash(),
            compute_root(&Sha256Hasher, &all_blocks(&tree)),
            "after {i} blocks"
        );
    }
    tree.check_consistency().expect("consistent");
}

#[test]
fn test_update_round_trip() {
    let mut tree = sha_tree(5);
    tree.append(&(0..23).collect::<Vec<u8>>()).unwrap().expect("append");
    let original = tree.root_hash();
    let old = tree.block(3).expect("leaf 3").to_vec();

    tree.update_leaf(3, b"hey").unwrap().expect("update");
    assert_ne!(tree.root_hash(), original);
    assert_eq!(tree.block(3), Some(b"hey".as_slice()));

    tree.update_leaf(3, &old).unwrap().expect("restore");
    assert_eq!(tree.root_hash(), original);
}

#[test]
fn test_update_to_empty_block() {
    let mut tree = sha_tree(5);
    tree.append(&[3; 10]).unwrap().expect("append");
    tree.update_leaf(1, &[]).unwrap().expect("update");
    assert_eq!(tree.block(1), Some([].as_slice()));
    assert_eq!(
        tree.root_hash(),
        compute_root(&Sha256Hasher, &[vec![3; 5], vec![]])
    );

    // append tops up the emptied last block
    tree.append(&[4]).unwrap().expect("append");
    assert_eq!(tree.block(1), Some([4].as_slice()));
    assert_eq!(tree.leaf_count(), 2);
}

#[test]
fn test_blake3_tree() {
    init_logging();
    let mut tree = IncrementalMerkleTree::new(Blake3Hasher, 8).expect("valid block size");
    tree.append(b"the quick brown fox jumps over the lazy dog")
        .unwrap()
        .expect("append");
    assert_eq!(tree.leaf_count(), 6);
    let leaf = tree.leaf_hash_at(0).expect("consistent").expect("leaf 0");
    assert_eq!(leaf, *blake3::hash(b"\x00the quic").as_bytes());
    assert_eq!(
        tree.root_hash(),
        compute_root(&Blake3Hasher, &all_blocks(&tree))
    );
}

#[test]
fn test_display_rendering() {
    let mut tree = sha_tree(5);
    tree.append(&[1, 2, 3, 4, 5, 6, 7]).unwrap().expect("append");
    let text = tree.to_string();
    assert!(text.starts_with("MerkleTree of 2 data blocks: [5,2]; leaf row: 1; nodes:"));
    assert!(text.ends_with("root hash: [hex: f16a90be..56d84964]"));
}
