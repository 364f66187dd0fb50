//! Evaluation errors.
//!
//! A rule failing to match is never an error: it is an answer with
//! `matched == false`. Errors are reserved for malformed grammars and
//! misuse, and abort the parse invocation.

use sprout_ir::RuleId;

/// Hard failure of a parse invocation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// A pattern rule matched the empty string.
    #[error("pattern `{pattern}` ({rule:?}) matched the empty string at offset {pos}")]
    EmptyPatternMatch {
        rule: RuleId,
        pattern: String,
        pos: usize,
    },

    /// A forward reference survived into evaluation.
    #[error("rule {rule:?} is an unresolved forward reference")]
    UnresolvedReference { rule: RuleId },

    /// The handle does not address a rule of the evaluated arena.
    #[error("rule {rule:?} does not belong to the evaluated grammar")]
    UnknownRule { rule: RuleId },

    /// The configured bound on rule applications was reached.
    #[error("step limit of {limit} rule applications exceeded")]
    StepLimitExceeded { limit: u64 },
}

impl EvalError {
    /// The grammar itself is malformed.
    pub fn is_definition_error(&self) -> bool {
        matches!(self, EvalError::EmptyPatternMatch { .. })
    }

    /// The caller handed the evaluator something it cannot run.
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            EvalError::UnresolvedReference { .. } | EvalError::UnknownRule { .. }
        )
    }
}
