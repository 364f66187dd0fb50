//! Nullability fixpoint.

use rustc_hash::FxHashSet;
use sprout_ir::{RuleArena, RuleId, RuleKind};

/// Compute the set of nullable rules among `rules`.
///
/// Starts from the flags already cached on each rule and repeats full passes
/// over `rules`, in the given order, until a pass adds nothing. Membership
/// only grows, so the result does not depend on `rules`' order.
///
/// Children outside `rules` contribute their cached flag. An empty sequence
/// never matches, so it is not nullable.
pub fn nullable_fixpoint(arena: &RuleArena, rules: &[RuleId]) -> FxHashSet<RuleId> {
    let mut nullable: FxHashSet<RuleId> = rules
        .iter()
        .copied()
        .filter(|&id| arena.flags(id).is_nullable())
        .collect();

    let mut passes = 0usize;
    loop {
        passes += 1;
        let mut changed = false;
        for &id in rules {
            if nullable.contains(&id) {
                continue;
            }
            let is_nullable = |child: &RuleId| {
                nullable.contains(child) || arena.flags(*child).is_nullable()
            };
            let now_nullable = match arena.kind(id) {
                RuleKind::Choice(children) => children.iter().any(is_nullable),
                RuleKind::Sequence(children) => {
                    !children.is_empty() && children.iter().all(is_nullable)
                }
                RuleKind::Optional(_) | RuleKind::Repetition(_) | RuleKind::Epsilon => true,
                RuleKind::Literal(text) => text.is_empty(),
                RuleKind::Pattern(_)
                | RuleKind::EndOfInput
                | RuleKind::Reference(_) => false,
            };
            if now_nullable {
                nullable.insert(id);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    tracing::trace!(passes, nullable = nullable.len(), "nullability fixpoint reached");
    nullable
}

#[cfg(test)]
mod tests;
