use pretty_assertions::assert_eq;
use rb_index::{Color, Config, Fault, RbTree, Verification};
use simplelog::{LevelFilter, TestLogger};

fn checked_tree() -> RbTree<u32, i32> {
    let _ = TestLogger::init(LevelFilter::Trace, simplelog::Config::default());
    RbTree::with_config(Config::new().verification(Verification::Always))
}

fn red_count(tree: &RbTree<u32, i32>) -> usize {
    tree.ids().filter(|id| tree.get(id).is_some_and(|node| node.is_red())).count()
}

#[test]
fn ascending_three_rotates_to_the_middle() {
    let mut tree = checked_tree();
    for (id, key) in [(1, 10), (2, 20), (3, 30)] {
        tree.insert(id, key).unwrap();
        assert!(red_count(&tree) <= 1);
        assert!(tree.is_rbt());
    }

    let root = tree.root().unwrap();
    assert_eq!((*root.id(), *root.key(), root.color()), (2, 20, Color::Black));
    assert_eq!(root.left().map(|node| *node.key()), Some(10));
    assert_eq!(root.right().map(|node| *node.key()), Some(30));
}

#[test]
fn descending_five_stays_balanced() {
    let mut tree = checked_tree();
    for (id, key) in (1..=5).zip((1..=5).rev()) {
        tree.insert(id, key).unwrap();
    }

    assert!(tree.check().is_valid());
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    assert!(tree.height() as f64 <= 2.0 * 6f64.log2());
    assert_eq!(tree.black_height(), 2);
}

#[test]
fn deleting_from_the_five_node_example() {
    let mut tree = checked_tree();
    for (id, key) in [(1, 50), (2, 30), (3, 70), (4, 20), (5, 40)] {
        tree.insert(id, key).unwrap();
    }

    assert_eq!(tree.delete(&3).unwrap(), Some((3, 70)));
    assert!(!tree.contains_id(&3));
    assert_eq!(tree.len(), 4);
    assert!(tree.is_rbt());

    // Every surviving identifier still reaches its own key.
    for (id, key) in [(1, 50), (2, 30), (4, 20), (5, 40)] {
        assert_eq!(tree.get(&id).map(|node| *node.key()), Some(key));
    }
}

#[test]
fn deleting_a_two_child_node_moves_the_successor_identity() {
    let mut tree = checked_tree();
    for (id, key) in [(1, 50), (2, 30), (3, 70), (4, 20), (5, 40)] {
        tree.insert(id, key).unwrap();
    }
    let root = tree.root().unwrap();
    assert_eq!(*root.id(), 1);
    assert!(root.left().is_some() && root.right().is_some());

    assert_eq!(tree.delete(&1).unwrap(), Some((1, 50)));
    assert!(!tree.contains_id(&1));
    assert_eq!(tree.key_of(&3), Some(&70));
    assert_eq!(tree.successor(&5).map(|node| *node.id()), Some(3));
    assert_eq!(tree.ids().copied().collect::<Vec<_>>(), [4, 2, 5, 3]);
    assert!(tree.is_rbt());
}

#[test]
fn deleting_twice_is_a_no_op() {
    let mut tree = checked_tree();
    for (id, key) in [(1, 5), (2, 6), (3, 7)] {
        tree.insert(id, key).unwrap();
    }

    assert_eq!(tree.delete(&2).unwrap(), Some((2, 6)));
    assert_eq!(tree.delete(&2).unwrap(), None);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.delete(&99).unwrap(), None);
    assert_eq!(tree.len(), 2);
}

#[test]
fn emptied_tree_has_no_extremes() {
    let mut tree = checked_tree();
    for (id, key) in [(1, 3), (2, 1), (3, 2), (4, 5), (5, 4)] {
        tree.insert(id, key).unwrap();
    }
    for id in [3, 1, 5, 2, 4] {
        assert!(tree.delete(&id).unwrap().is_some());
    }

    assert!(tree.is_empty());
    assert!(tree.minimum().is_none());
    assert!(tree.maximum().is_none());
    assert!(tree.root().is_none());
    assert_eq!(tree.check().faults(), &[] as &[Fault<u32>]);
}

#[test]
fn subtree_extremes_and_parents() {
    let tree = RbTree::from([(1u32, 50), (2, 30), (3, 70), (4, 20), (5, 40)]);
    let root = tree.root().unwrap();
    let left = root.left().unwrap();

    assert_eq!(*left.minimum().key(), 20);
    assert_eq!(*left.maximum().key(), 40);
    assert_eq!(left.parent(), Some(root));
    assert_eq!(root.parent(), None);
    assert_eq!(*root.maximum().id(), 3);
}

#[test]
fn render_shows_structure_and_validity() {
    let mut tree = checked_tree();
    for (id, key) in [(1, 10), (2, 20), (3, 30)] {
        tree.insert(id, key).unwrap();
    }

    let expected = "\
(size = 3, rbt = true)
node(id=2, key=20, parent=nil, left=1, right=3, black)
  node(id=1, key=10, parent=2, left=nil, right=nil, black)
  node(id=3, key=30, parent=2, left=nil, right=nil, black)";
    assert_eq!(tree.render(), expected);
}
