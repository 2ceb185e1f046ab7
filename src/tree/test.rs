use quickcheck::{Arbitrary, Gen, TestResult, quickcheck};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use super::{Inserted, NodeId, RedBlackTree};
use super::super::node::{Color, Left, Right};

/// An operation on a `RedBlackTree`.
#[derive(Clone, Debug)]
enum Op<K> {
    /// Insert a key into the tree.
    Insert(K),
    /// Remove the key at index `n % tree.len()` from the tree.
    Remove(usize),
}

impl<K> Arbitrary for Op<K> where K: Arbitrary {
    fn arbitrary(gen: &mut Gen) -> Op<K> {
        if bool::arbitrary(gen) {
            Op::Insert(K::arbitrary(gen))
        } else {
            Op::Remove(usize::arbitrary(gen))
        }
    }
}

impl<K> Op<K> where K: Clone + Ord {
    /// Perform the operation on the given tree.
    fn exec(self, tree: &mut RedBlackTree<K, ()>) {
        match self {
            Op::Insert(key) => { tree.insert(key, ()); }
            Op::Remove(index) => if !tree.is_empty() {
                let key = tree.walk().nth(index % tree.len()).map(|e| e.key().clone());
                if let Some(key) = key { tree.remove(&key); }
            },
        }
    }
}

/// Checks every red-black and binary-search-tree property, returning the black height.
fn assert_red_black<K, V>(tree: &RedBlackTree<K, V>) -> usize where K: Ord {
    fn check<K, V>(tree: &RedBlackTree<K, V>, link: Option<NodeId>, parent: Option<NodeId>,
                   lo: Option<&K>, hi: Option<&K>) -> usize where K: Ord {
        let id = match link {
            None => return 1,
            Some(id) => id,
        };

        let node = tree.nodes.get(id);
        assert_eq!(node.parent, parent);
        if let Some(lo) = lo { assert!(node.entry.key() > lo); }
        if let Some(hi) = hi { assert!(node.entry.key() < hi); }

        if node.color == Color::Red {
            assert_eq!(tree.nodes.color_of(node.left), Color::Black);
            assert_eq!(tree.nodes.color_of(node.right), Color::Black);
        }

        let left = check(tree, node.left, link, lo, Some(node.entry.key()));
        let right = check(tree, node.right, link, Some(node.entry.key()), hi);
        assert_eq!(left, right);
        left + (node.color == Color::Black) as usize
    }

    assert_eq!(tree.nodes.color_of(tree.root), Color::Black);
    assert_eq!(tree.nodes.len(), tree.len());
    check(tree, tree.root, None, None, None)
}

fn keys<K: Clone + Ord, V>(tree: &RedBlackTree<K, V>) -> Vec<K> {
    tree.walk().map(|e| e.key().clone()).collect()
}

#[test]
fn test_red_black() {
    fn check(ops: Vec<Op<u32>>) -> TestResult {
        let mut tree = RedBlackTree::new();
        for op in ops {
            op.exec(&mut tree);
            assert_red_black(&tree);
        }
        TestResult::passed()
    }

    quickcheck(check as fn(_) -> _);
}

#[test]
fn test_agrees_with_btree_map() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut tree = RedBlackTree::new();
    let mut model = BTreeMap::new();

    for step in 0..10_000 {
        let key: u32 = rng.gen_range(0..500);

        if rng.gen_bool(0.55) {
            let value = rng.gen::<u16>();
            let fresh = matches!(tree.insert(key, value), Inserted::Vacant(_));
            assert_eq!(fresh, !model.contains_key(&key));
            model.entry(key).or_insert(value);
        } else {
            let removed = tree.remove(&key).map(|e| e.into_pair());
            assert_eq!(removed, model.remove_entry(&key));
        }

        assert_eq!(tree.len(), model.len());
        assert_red_black(&tree);
    }

    assert_red_black(&tree);
    assert_eq!(keys(&tree), model.keys().cloned().collect::<Vec<_>>());
}

#[test]
fn test_ascending_inserts_stay_shallow() {
    let mut tree = RedBlackTree::new();
    for key in 0..1024u32 { tree.insert(key, ()); }

    // n >= 2^bh - 1, counting the nil leaf in bh.
    let black_height = assert_red_black(&tree);
    assert!(black_height <= 11);
}

#[test]
fn test_rotations_preserve_order() {
    let mut tree = RedBlackTree::new();
    for key in [4, 2, 6, 1, 3, 5, 7] { tree.insert(key, ()); }
    let before = keys(&tree);

    let root = tree.root().unwrap();
    tree.rotate::<Left>(root);
    assert_eq!(tree.entry(tree.root().unwrap()).map(|e| *e.key()), Some(6));
    assert_eq!(keys(&tree), before);

    let root = tree.root().unwrap();
    tree.rotate::<Right>(root);
    assert_eq!(tree.entry(tree.root().unwrap()).map(|e| *e.key()), Some(4));
    assert_eq!(keys(&tree), before);
}

#[test]
fn test_duplicate_insert_leaves_tree_alone() {
    let mut tree = RedBlackTree::new();
    tree.insert(1, 'a');
    let count = tree.mod_count();

    match tree.insert(1, 'b') {
        Inserted::Occupied(_, key, value) => assert_eq!((key, value), (1, 'b')),
        Inserted::Vacant(_) => panic!("duplicate key was inserted"),
    }

    assert_eq!(tree.mod_count(), count);
    assert_eq!(tree.get_node(&1).and_then(|id| tree.entry(id)).map(|e| *e.value()), Some('a'));
}

#[test]
fn test_mod_count_once_per_change() {
    let mut tree = RedBlackTree::new();
    for key in 0..100u32 { tree.insert(key, ()); }
    assert_eq!(tree.mod_count(), 100);

    tree.remove(&50);
    tree.remove(&1000);
    assert_eq!(tree.mod_count(), 101);

    let id = tree.get_node(&7).unwrap();
    tree.value_mut(id);
    assert_eq!(tree.mod_count(), 101);

    tree.clear();
    assert_eq!(tree.mod_count(), 102);
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
}

#[test]
fn test_delete_reports_relocated_successor() {
    let mut tree = RedBlackTree::new();
    for key in [10, 20, 30, 40, 50] { tree.insert(key, ()); }

    let twenty = tree.get_node(&20).unwrap();
    let thirty = tree.get_node(&30).unwrap();

    let (entry, moved) = tree.delete(twenty);
    assert_eq!(*entry.key(), 20);
    assert_eq!(moved, Some(thirty));
    assert_eq!(tree.get_node(&30), Some(twenty));
    assert!(tree.entry(thirty).is_none());
    assert_red_black(&tree);

    let ten = tree.get_node(&10).unwrap();
    assert_eq!(tree.delete(ten).1, None);
    assert_eq!(keys(&tree), [30, 40, 50]);
    assert_red_black(&tree);
}

#[test]
fn test_bound_searches() {
    let mut tree = RedBlackTree::new();
    for key in (0..20u32).map(|k| k * 10) { tree.insert(key, ()); }

    let key = |id: Option<NodeId>| id.and_then(|id| tree.entry(id)).map(|e| *e.key());

    assert_eq!(key(tree.ceiling_node(&35)), Some(40));
    assert_eq!(key(tree.ceiling_node(&40)), Some(40));
    assert_eq!(key(tree.higher_node(&40)), Some(50));
    assert_eq!(key(tree.floor_node(&35)), Some(30));
    assert_eq!(key(tree.floor_node(&30)), Some(30));
    assert_eq!(key(tree.lower_node(&30)), Some(20));

    assert_eq!(key(tree.lower_node(&0)), None);
    assert_eq!(key(tree.floor_node(&0)), Some(0));
    assert_eq!(key(tree.higher_node(&190)), None);
    assert_eq!(key(tree.ceiling_node(&191)), None);
    assert_eq!(key(tree.floor_node(&1000)), Some(190));
    assert_eq!(key(tree.ceiling_node(&1000)), None);

    assert_eq!(key(tree.first_node()), Some(0));
    assert_eq!(key(tree.last_node()), Some(190));
}

#[test]
fn test_bound_searches_agree_with_btree_map() {
    fn check(keys: Vec<u16>, probe: u16) -> bool {
        let tree: RedBlackTree<u16, ()> = {
            let mut tree = RedBlackTree::new();
            for &key in &keys { tree.insert(key, ()); }
            tree
        };
        let model: BTreeMap<u16, ()> = keys.iter().map(|&k| (k, ())).collect();
        let key = |id: Option<NodeId>| id.and_then(|id| tree.entry(id)).map(|e| *e.key());

        key(tree.ceiling_node(&probe)) == model.range(probe..).next().map(|(&k, _)| k)
            && key(tree.higher_node(&probe))
                == model.range(probe..).map(|(&k, _)| k).find(|&k| k > probe)
            && key(tree.floor_node(&probe)) == model.range(..=probe).next_back().map(|(&k, _)| k)
            && key(tree.lower_node(&probe)) == model.range(..probe).next_back().map(|(&k, _)| k)
    }

    quickcheck(check as fn(Vec<u16>, u16) -> bool);
}

#[test]
fn test_empty() {
    let mut tree: RedBlackTree<u32, ()> = RedBlackTree::new();
    assert!(tree.first_node().is_none());
    assert!(tree.ceiling_node(&0).is_none());
    assert!(tree.remove(&0).is_none());
    assert_eq!(tree.mod_count(), 0);
    assert_eq!(format!("{:?}", tree), "{}");
}
