//! Construction-time errors for rule graphs and trees.

use crate::{NodeId, RuleId};

/// Error raised while building or resolving a rule graph.
///
/// All variants are definition or misuse errors: they describe a malformed
/// grammar, never a failed match.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    /// The regular expression failed to compile.
    #[error("invalid pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The regular expression accepts the empty string.
    #[error("pattern `{pattern}` matches the empty string")]
    EmptyPattern { pattern: String },

    /// `bind` was called on a rule that is not a forward reference.
    #[error("rule {rule:?} (`{name}`) is not a forward reference")]
    NotAReference { rule: RuleId, name: String },

    /// `bind` was called twice on the same forward reference.
    #[error("forward reference {rule:?} is already bound")]
    AlreadyBound { rule: RuleId },

    /// A reachable forward reference was never bound.
    #[error("forward reference {rule:?} was never bound")]
    UnboundReference { rule: RuleId },

    /// A forward reference is bound, through other references, to itself.
    #[error("forward reference {rule:?} resolves to itself")]
    ReferenceCycle { rule: RuleId },
}

/// Error raised by structural edits on a [`Tree`](crate::Tree).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The node already has a parent.
    #[error("node {node:?} is already attached to a parent")]
    AlreadyAttached { node: NodeId },

    /// Attaching the node would make it its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },

    /// Insert position past the end of the child list.
    #[error("index {index} is out of range for {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    /// The node is not a child of the given parent.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
}
