//! Grammar registration errors.

use sprout_ir::{IrError, RuleId};

/// Error raised while registering rules into a [`Grammar`](crate::Grammar).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// The grammar was already analyzed and is immutable.
    #[error("grammar is finalized; no more rules can be registered")]
    Finalized,

    /// The handle does not address a rule of this grammar's arena.
    #[error("rule {rule:?} does not belong to this grammar")]
    UnknownRule { rule: RuleId },

    /// Forward-reference resolution failed.
    #[error(transparent)]
    Resolve(#[from] IrError),
}
