//! Left-recursion detection.
//!
//! `could_start_with(A, B)` holds when applying `A` at some position may
//! apply `B` at that same position before anything is consumed:
//!
//! | Rule | Direct first calls |
//! |------|--------------------|
//! | `Choice` | every child |
//! | `Sequence` | children up to and including the first non-nullable one |
//! | `Optional` / `Repetition` | the child |
//! | terminals | none |
//!
//! A rule is left-recursive iff it is in the transitive closure of its own
//! first calls.

use rustc_hash::{FxHashMap, FxHashSet};
use sprout_ir::{RuleArena, RuleId, RuleKind};

/// Rules that `id` may apply first, at its own starting position.
pub fn first_calls<'a>(
    arena: &'a RuleArena,
    id: RuleId,
    nullable: &FxHashSet<RuleId>,
) -> &'a [RuleId] {
    match arena.kind(id) {
        RuleKind::Choice(children) => children,
        RuleKind::Sequence(children) => {
            match children.iter().position(|child| !nullable.contains(child)) {
                Some(blocking) => &children[..=blocking],
                None => children,
            }
        }
        RuleKind::Optional(child) | RuleKind::Repetition(child) => std::slice::from_ref(child),
        RuleKind::Literal(_)
        | RuleKind::Pattern(_)
        | RuleKind::Epsilon
        | RuleKind::EndOfInput
        | RuleKind::Reference(_) => &[],
    }
}

/// Transitive closure of the "could start with" relation.
#[derive(Clone, Debug, Default)]
pub struct LeftRecursion {
    reachable: FxHashMap<RuleId, FxHashSet<RuleId>>,
}

impl LeftRecursion {
    /// Compute the closure over `rules`, given the nullable set.
    pub fn compute(arena: &RuleArena, rules: &[RuleId], nullable: &FxHashSet<RuleId>) -> Self {
        let mut reachable = FxHashMap::default();
        for &source in rules {
            let mut seen = FxHashSet::default();
            let mut pending: Vec<RuleId> = first_calls(arena, source, nullable).to_vec();
            while let Some(next) = pending.pop() {
                if seen.insert(next) {
                    pending.extend_from_slice(first_calls(arena, next, nullable));
                }
            }
            reachable.insert(source, seen);
        }
        LeftRecursion { reachable }
    }

    /// Whether `a` may, possibly through other rules, apply `b` first.
    pub fn could_start_with(&self, a: RuleId, b: RuleId) -> bool {
        self.reachable.get(&a).is_some_and(|set| set.contains(&b))
    }

    #[inline]
    pub fn is_left_recursive(&self, rule: RuleId) -> bool {
        self.could_start_with(rule, rule)
    }
}
