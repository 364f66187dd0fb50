//! Owned, mutable ordered trees.
//!
//! `Tree<T>` stores nodes in a flat arena and links them with `NodeId`
//! handles. Each node has at most one parent at a time: attaching a node
//! that is already attached, or attaching a node beneath itself, is an
//! error. Detached nodes stay in the arena and can be attached again.
//!
//! Parse results are a `Tree<ParseNode>`; the type is otherwise generic and
//! usable by anything that needs an ordered tree with parent links.

use std::fmt;

use crate::TreeError;

/// Handle to a node of a [`Tree`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

#[derive(Clone, Debug)]
struct Slot<T> {
    value: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed ordered tree (or forest, while nodes are detached).
#[derive(Clone, Debug)]
pub struct Tree<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Tree { slots: Vec::new() }
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a detached node.
    pub fn new_node(&mut self, value: T) -> NodeId {
        let id = NodeId::new(self.slots.len() as u32);
        self.slots.push(Slot {
            value,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Allocate a node already attached as the last child of `parent`.
    pub fn new_child(&mut self, parent: NodeId, value: T) -> NodeId {
        let id = self.new_node(value);
        self.slots[id.index()].parent = Some(parent);
        self.slots[parent.index()].children.push(id);
        id
    }

    /// Number of allocated nodes, attached or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// # Panics
    /// Panics if `id` does not belong to this tree.
    #[inline]
    #[track_caller]
    pub fn value(&self, id: NodeId) -> &T {
        &self.slots[id.index()].value
    }

    /// # Panics
    /// Panics if `id` does not belong to this tree.
    #[inline]
    #[track_caller]
    pub fn value_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.slots[id.index()].value
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots[id.index()].parent
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.slots[id.index()].children
    }

    #[inline]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.slots[id.index()].children.len()
    }

    #[inline]
    pub fn is_root(&self, id: NodeId) -> bool {
        self.parent(id).is_none()
    }

    /// Walk parent links to the top.
    pub fn root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Position of `id` among its parent's children; `None` for a root.
    pub fn index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Append `children` to `parent`, in order.
    ///
    /// Nothing is attached unless every child can be.
    pub fn add(&mut self, parent: NodeId, children: &[NodeId]) -> Result<(), TreeError> {
        for (i, &child) in children.iter().enumerate() {
            self.check_attachable(parent, child)?;
            if children[..i].contains(&child) {
                return Err(TreeError::AlreadyAttached { node: child });
            }
        }
        for &child in children {
            self.slots[child.index()].parent = Some(parent);
            self.slots[parent.index()].children.push(child);
        }
        Ok(())
    }

    /// Insert `child` at `index` among `parent`'s children.
    pub fn insert(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<(), TreeError> {
        let len = self.child_count(parent);
        if index > len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }
        self.check_attachable(parent, child)?;
        self.slots[child.index()].parent = Some(parent);
        self.slots[parent.index()].children.insert(index, child);
        Ok(())
    }

    /// Detach `child` from `parent`. Returns false if it was not a child.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> bool {
        let children = &mut self.slots[parent.index()].children;
        let Some(position) = children.iter().position(|&c| c == child) else {
            return false;
        };
        children.remove(position);
        self.slots[child.index()].parent = None;
        true
    }

    /// Put `new` where `old` was; `old` becomes detached.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        old: NodeId,
        new: NodeId,
    ) -> Result<(), TreeError> {
        let Some(position) = self.children(parent).iter().position(|&c| c == old) else {
            return Err(TreeError::NotAChild { parent, child: old });
        };
        if old == new {
            return Ok(());
        }
        self.check_attachable(parent, new)?;
        self.slots[old.index()].parent = None;
        self.slots[new.index()].parent = Some(parent);
        self.slots[parent.index()].children[position] = new;
        Ok(())
    }

    /// Detach every child of `id`.
    pub fn clear(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.slots[id.index()].children);
        for child in children {
            self.slots[child.index()].parent = None;
        }
    }

    /// First child whose value satisfies `predicate`.
    pub fn find_child(&self, parent: NodeId, mut predicate: impl FnMut(&T) -> bool) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| predicate(self.value(c)))
    }

    /// `id` and all of its descendants, in pre-order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_, T> {
        Descendants {
            tree: self,
            pending: vec![id],
        }
    }

    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if self.parent(child).is_some() {
            return Err(TreeError::AlreadyAttached { node: child });
        }
        // `child` is detached, so it is the root of its own subtree; the only
        // way to form a cycle is for `parent` to live inside that subtree.
        if self.root(parent) == child {
            return Err(TreeError::WouldCycle { parent, child });
        }
        Ok(())
    }
}

impl<T: PartialEq> Tree<T> {
    /// Compare the subtree at `a` with the subtree at `b` in `other`:
    /// same values, same shape, same child order.
    pub fn subtree_eq(&self, a: NodeId, other: &Tree<T>, b: NodeId) -> bool {
        let mut pending = vec![(a, b)];
        while let Some((x, y)) = pending.pop() {
            if self.value(x) != other.value(y) {
                return false;
            }
            let (xs, ys) = (self.children(x), other.children(y));
            if xs.len() != ys.len() {
                return false;
            }
            pending.extend(xs.iter().copied().zip(ys.iter().copied()));
        }
        true
    }
}

/// Pre-order walk, see [`Tree::descendants`].
pub struct Descendants<'a, T> {
    tree: &'a Tree<T>,
    pending: Vec<NodeId>,
}

impl<T> Iterator for Descendants<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.pending.pop()?;
        self.pending
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests;
