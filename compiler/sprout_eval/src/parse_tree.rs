//! Owned parse results.

use std::rc::Rc;

use sprout_ir::{NodeId, RuleId, Tree};

use crate::answer::Answer;

/// One successful (or, at the root, attempted) rule application.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParseNode {
    pub rule: RuleId,
    /// Byte offset where the application started.
    pub start: usize,
    pub matched: bool,
    /// Matched length in bytes; zero when `matched` is false.
    pub length: usize,
}

impl ParseNode {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

impl From<&Answer> for ParseNode {
    fn from(answer: &Answer) -> Self {
        ParseNode {
            rule: answer.rule,
            start: answer.start,
            matched: answer.matched,
            length: answer.length,
        }
    }
}

/// The derivation produced by one rule application.
///
/// Only the root may be unmatched; every descendant took part in the match.
/// Trees are independent of the evaluator that produced them and are `Send`.
#[derive(Clone, Debug)]
pub struct ParseTree {
    tree: Tree<ParseNode>,
    root: NodeId,
}

impl ParseTree {
    pub(crate) fn from_answer(answer: &Rc<Answer>) -> Self {
        let mut tree = Tree::new();
        let root = tree.new_node(ParseNode::from(&**answer));
        let mut pending = vec![(root, Rc::clone(answer))];
        while let Some((node, answer)) = pending.pop() {
            for child in &answer.children {
                let id = tree.new_child(node, ParseNode::from(&**child));
                pending.push((id, Rc::clone(child)));
            }
        }
        ParseTree { tree, root }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn root_node(&self) -> &ParseNode {
        self.tree.value(self.root)
    }

    #[inline]
    pub fn matched(&self) -> bool {
        self.root_node().matched
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.root_node().length
    }

    /// Whether the match covers `buffer` entirely.
    pub fn is_complete(&self, buffer: &str) -> bool {
        self.matched() && self.root_node().start == 0 && self.length() == buffer.len()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &ParseNode {
        self.tree.value(id)
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree.children(id)
    }

    /// The text matched by `id`.
    ///
    /// `buffer` must be the input the tree was parsed from.
    pub fn text<'a>(&self, id: NodeId, buffer: &'a str) -> &'a str {
        let node = self.node(id);
        buffer.get(node.start..node.end()).unwrap_or_default()
    }

    /// Nodes in pre-order, starting at the root.
    pub fn descendants(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.tree.descendants(self.root)
    }

    /// First node, in pre-order, produced by `rule`.
    pub fn find(&self, rule: RuleId) -> Option<NodeId> {
        self.descendants().find(|&id| self.node(id).rule == rule)
    }

    /// The underlying tree.
    pub fn tree(&self) -> &Tree<ParseNode> {
        &self.tree
    }
}

impl PartialEq for ParseTree {
    fn eq(&self, other: &Self) -> bool {
        self.tree.subtree_eq(self.root, &other.tree, other.root)
    }
}

impl Eq for ParseTree {}
