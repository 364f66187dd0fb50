//! Rule graph for the Sprout PEG engine.
//!
//! Grammars are assembled bottom-up with [`GrammarBuilder`] combinators into a
//! flat [`RuleArena`]. Rules reference each other by [`RuleId`], so cycles are
//! expressed with forward references that are later rewritten away by
//! [`RuleArena::resolve_references`].
//!
//! # Layout
//!
//! - `rule_id`: `RuleId(u32)` handle, identity of a grammar node
//! - `flags`: cached analysis flags (`NULLABLE`, `LEFT_RECURSIVE`)
//! - `rule`: `Rule` / `RuleKind` node variants and pattern matching
//! - `arena`: contiguous rule storage
//! - `builder`: combinator API used by grammar authors
//! - `resolve`: forward-reference rewrite pass
//! - `tree`: generic owned ordered tree, the backbone of parse results

mod arena;
mod builder;
mod error;
mod flags;
mod resolve;
mod rule;
mod rule_id;
pub mod tree;

pub use arena::{RuleArena, RuleDisplay};
pub use builder::GrammarBuilder;
pub use error::{IrError, TreeError};
pub use flags::RuleFlags;
pub use rule::{Pattern, Rule, RuleKind, RuleList};
pub use rule_id::RuleId;
pub use tree::{NodeId, Tree};
