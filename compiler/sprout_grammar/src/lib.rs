//! Grammar registry and static analysis.
//!
//! A [`Grammar`] owns a rule arena, records every rule reachable from its
//! registered roots, and on [`Grammar::analyze`] computes two diagnostics:
//!
//! - **Nullability**: which rules can succeed without consuming input
//!   (fixpoint over all registered rules, see [`nullable_fixpoint`]).
//! - **Left recursion**: which rules can re-invoke themselves at the same
//!   position (transitive closure of "could start with", see
//!   [`LeftRecursion`]).
//!
//! Analysis is informational. The evaluator discovers left recursion on its
//! own and does not require an analyzed grammar.

mod error;
mod left_recursion;
mod nullable;
mod registry;

pub use error::GrammarError;
pub use left_recursion::{first_calls, LeftRecursion};
pub use nullable::nullable_fixpoint;
pub use registry::Grammar;
