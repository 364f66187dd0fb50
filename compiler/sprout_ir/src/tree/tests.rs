#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_creation() {
    let mut tree = Tree::new();
    let a = tree.new_node("a");
    assert_eq!(*tree.value(a), "a");
    assert!(tree.is_root(a));
    assert_eq!(tree.child_count(a), 0);
}

#[test]
fn test_value_mut() {
    let mut tree = Tree::new();
    let a = tree.new_node(String::from("a"));
    let b = tree.new_child(a, String::from("b"));
    tree.value_mut(b).push('!');
    assert_eq!(tree.value(b), "b!");
    assert_eq!(tree.value(a), "a");
}

#[test]
fn test_separation() {
    let mut tree = Tree::new();
    let a = tree.new_node("a");
    let b = tree.new_node("b");
    let c = tree.new_node("c");
    tree.add(b, &[c]).unwrap();
    assert_eq!(tree.child_count(a), 0);
}

#[test]
fn test_add() {
    let mut tree = Tree::new();
    let node = tree.new_node("a");
    let child = tree.new_node("b");
    tree.add(node, &[child]).unwrap();
    assert_eq!(tree.child_count(node), 1);
    assert_eq!(tree.parent(child), Some(node));
    assert_eq!(tree.index(child), Some(0));
    assert_eq!(tree.root(child), node);
}

#[test]
fn test_add_multiple_and_insert() {
    let mut tree = Tree::new();
    let node = tree.new_node("a");
    let child = tree.new_node("b");
    let child2 = tree.new_node("c");
    tree.add(node, &[child, child2]).unwrap();
    assert_eq!(tree.index(child2), Some(1));

    let child3 = tree.new_node("d");
    tree.insert(node, child3, 1).unwrap();
    assert_eq!(tree.index(child3), Some(1));
    assert_eq!(tree.index(child2), Some(2));
}

#[test]
fn test_insert_out_of_range() {
    let mut tree = Tree::new();
    let node = tree.new_node("a");
    let child = tree.new_node("b");
    assert_eq!(
        tree.insert(node, child, 1),
        Err(TreeError::IndexOutOfRange { index: 1, len: 0 })
    );
}

#[test]
fn test_remove_clears_parent() {
    let mut tree = Tree::new();
    let node = tree.new_node("a");
    let child = tree.new_node("b");
    tree.add(node, &[child]).unwrap();
    assert!(tree.remove(node, child));
    assert!(tree.is_root(child));
    assert_eq!(tree.index(child), None);
    assert!(!tree.remove(node, child));
}

#[test]
fn test_exclusive_ownership() {
    let mut tree = Tree::new();
    let first = tree.new_node("p1");
    let second = tree.new_node("p2");
    let child = tree.new_node("c");
    tree.add(first, &[child]).unwrap();
    assert_eq!(
        tree.add(second, &[child]),
        Err(TreeError::AlreadyAttached { node: child })
    );
    assert_eq!(tree.child_count(second), 0);

    // Once detached it can move.
    tree.remove(first, child);
    tree.add(second, &[child]).unwrap();
    assert_eq!(tree.parent(child), Some(second));
}

#[test]
fn test_add_same_child_twice_in_one_call() {
    let mut tree = Tree::new();
    let node = tree.new_node("a");
    let child = tree.new_node("b");
    assert_eq!(
        tree.add(node, &[child, child]),
        Err(TreeError::AlreadyAttached { node: child })
    );
    assert_eq!(tree.child_count(node), 0);
}

#[test]
fn test_cycle_rejected() {
    let mut tree = Tree::new();
    let top = tree.new_node("top");
    let mid = tree.new_node("mid");
    tree.add(top, &[mid]).unwrap();
    assert_eq!(
        tree.add(mid, &[top]),
        Err(TreeError::WouldCycle {
            parent: mid,
            child: top
        })
    );
    assert_eq!(
        tree.add(top, &[top]),
        Err(TreeError::WouldCycle {
            parent: top,
            child: top
        })
    );
}

#[test]
fn test_replace() {
    let mut tree = Tree::new();
    let node = tree.new_node("a");
    let child = tree.new_node("b");
    let child2 = tree.new_node("c");
    tree.add(node, &[child, child2]).unwrap();
    let child3 = tree.new_node("d");
    tree.replace_child(node, child2, child3).unwrap();
    assert_eq!(tree.children(node).last(), Some(&child3));
    assert!(tree.is_root(child2));
    assert_eq!(
        tree.replace_child(node, child2, child3),
        Err(TreeError::NotAChild {
            parent: node,
            child: child2
        })
    );
}

#[test]
fn test_find_child() {
    let mut tree = Tree::new();
    let node = tree.new_node("a");
    let child = tree.new_node("b");
    let child2 = tree.new_node("c");
    tree.add(node, &[child, child2]).unwrap();
    assert_eq!(tree.find_child(node, |v| *v == "c"), Some(child2));
    assert_eq!(tree.find_child(node, |v| *v == "z"), None);
}

#[test]
fn test_clear_detaches_children() {
    let mut tree = Tree::new();
    let node = tree.new_node("a");
    let child = tree.new_node("b");
    tree.add(node, &[child]).unwrap();
    tree.clear(node);
    assert_eq!(tree.child_count(node), 0);
    assert!(tree.is_root(child));
}

#[test]
fn test_descendants_preorder() {
    let mut tree = Tree::new();
    let a = tree.new_node("a");
    let b = tree.new_node("b");
    let c = tree.new_node("c");
    let d = tree.new_node("d");
    tree.add(a, &[b, d]).unwrap();
    tree.add(b, &[c]).unwrap();
    let order: Vec<&str> = tree.descendants(a).map(|id| *tree.value(id)).collect();
    assert_eq!(order, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_subtree_eq() {
    let mut left = Tree::new();
    let la = left.new_node(1);
    let lb = left.new_node(2);
    left.add(la, &[lb]).unwrap();

    let mut right = Tree::new();
    let unrelated = right.new_node(9);
    let ra = right.new_node(1);
    let rb = right.new_node(2);
    right.add(ra, &[rb]).unwrap();

    assert!(left.subtree_eq(la, &right, ra));
    assert!(!left.subtree_eq(la, &right, unrelated));
    right.clear(ra);
    assert!(!left.subtree_eq(la, &right, ra));
}

#[test]
fn test_new_child_appends() {
    let mut tree = Tree::new();
    let root = tree.new_node("root");
    let first = tree.new_child(root, "first");
    let second = tree.new_child(root, "second");
    assert_eq!(tree.children(root), &[first, second]);
    assert_eq!(tree.parent(second), Some(root));
    assert_eq!(tree.root(second), root);
}
