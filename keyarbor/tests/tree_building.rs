use keyarbor::{TreeNode, SEGMENT_SEPARATOR};
use pretty_assertions::assert_eq;

fn sample_keys() -> Vec<Vec<u8>> {
    [
        "Root",
        "Robots",
        "Robots:RootTests",
        "SL2",
        "SL2:SL2A",
        "SL2:SL2A:deep",
    ]
    .iter()
    .map(|key| key.as_bytes().to_vec())
    .collect()
}

#[test]
fn sample_key_set_builds_the_expected_tree() {
    let root = TreeNode::from_keys(&sample_keys());

    let names: Vec<_> = root.children.keys().cloned().collect();
    assert_eq!(names, [b"Root".to_vec(), b"Robots".to_vec(), b"SL2".to_vec()]);

    let robots = root.child(b"Robots").unwrap();
    assert_eq!(robots.full_key, Some(b"Robots".to_vec()));
    assert!(robots.has_both_roles());
    assert_eq!(
        robots.child(b"RootTests").unwrap().full_key,
        Some(b"Robots:RootTests".to_vec())
    );

    let sl2a = root.descendant(&[b"SL2".as_slice(), b"SL2A".as_slice()]).unwrap();
    assert_eq!(sl2a.full_key, Some(b"SL2:SL2A".to_vec()));
    assert!(sl2a.has_both_roles());
    assert_eq!(
        sl2a.child(b"deep").unwrap().full_key,
        Some(b"SL2:SL2A:deep".to_vec())
    );
    assert!(sl2a.child(b"deep").unwrap().is_leaf());
}

#[test]
fn every_key_is_reachable_at_exactly_its_segment_path() {
    let keys = sample_keys();
    let root = TreeNode::from_keys(&keys);

    for key in &keys {
        let path: Vec<&[u8]> = key.split(|b| *b == SEGMENT_SEPARATOR).collect();
        let node = root.descendant(&path).expect("segment path must exist");
        assert_eq!(node.full_key.as_ref(), Some(key));
    }
}

#[test]
fn stored_key_count_matches_terminal_node_count() {
    fn count_terminals(node: &TreeNode) -> usize {
        usize::from(node.full_key.is_some())
            + node.children.values().map(count_terminals).sum::<usize>()
    }

    let keys = sample_keys();
    let root = TreeNode::from_keys(&keys);
    assert_eq!(count_terminals(&root), keys.len());
}

#[test]
fn builds_from_different_supply_orders_are_shape_equal() {
    let keys = sample_keys();
    let mut shuffled = keys.clone();
    shuffled.rotate_left(2);
    shuffled.swap(0, 3);

    let forward = TreeNode::from_keys(&keys);
    let reordered = TreeNode::from_keys(&shuffled);

    assert!(forward.shape_eq(&reordered));
    // Child iteration order is allowed to differ; shape equality is the
    // comparison that matters.
    assert!(reordered.shape_eq(&forward));
}

#[test]
fn rebuilding_from_the_same_sequence_is_deterministic() {
    let keys = sample_keys();
    let first = TreeNode::from_keys(&keys);
    let second = TreeNode::from_keys(&keys);

    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}
