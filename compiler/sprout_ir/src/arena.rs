//! Contiguous storage for rule graphs.
//!
//! Every rule of a grammar lives in one `RuleArena`; edges are `RuleId`
//! indices, which is what lets the graph be cyclic without shared ownership.

use std::fmt;

use crate::{Rule, RuleFlags, RuleId, RuleKind};

/// Flat storage for all rules of a grammar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleArena {
    rules: Vec<Rule>,
}

impl RuleArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a rule, return its ID.
    #[inline]
    pub fn alloc(&mut self, rule: Rule) -> RuleId {
        let id = RuleId::new(self.rules.len() as u32);
        self.rules.push(rule);
        id
    }

    /// Get rule by ID.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this arena.
    #[inline]
    #[track_caller]
    pub fn get(&self, id: RuleId) -> &Rule {
        &self.rules[id.index()]
    }

    /// Get mutable rule by ID.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this arena.
    #[inline]
    #[track_caller]
    pub fn get_mut(&mut self, id: RuleId) -> &mut Rule {
        &mut self.rules[id.index()]
    }

    /// Check whether `id` addresses a rule of this arena.
    #[inline]
    pub fn contains(&self, id: RuleId) -> bool {
        id.index() < self.rules.len()
    }

    #[inline]
    pub fn kind(&self, id: RuleId) -> &RuleKind {
        self.get(id).kind()
    }

    #[inline]
    pub fn name(&self, id: RuleId) -> &str {
        self.get(id).name()
    }

    #[inline]
    pub fn flags(&self, id: RuleId) -> RuleFlags {
        self.get(id).flags()
    }

    /// Number of allocated rules, including discarded forward references.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render a rule in grammar notation, e.g. `R[Ra|b]` or `a*`.
    pub fn display(&self, id: RuleId) -> RuleDisplay<'_> {
        RuleDisplay { arena: self, id }
    }
}

/// Grammar-notation rendering of one rule, see [`RuleArena::display`].
pub struct RuleDisplay<'a> {
    arena: &'a RuleArena,
    id: RuleId,
}

impl fmt::Display for RuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = self.arena.get(self.id);
        let join = |f: &mut fmt::Formatter<'_>, children: &[RuleId], sep: &str| {
            write!(f, "{}[", rule.name())?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                f.write_str(self.arena.name(*child))?;
            }
            f.write_str("]")
        };
        match rule.kind() {
            RuleKind::Literal(_) => f.write_str(rule.name()),
            RuleKind::Pattern(pattern) => write!(f, "re[{}]", pattern.source()),
            RuleKind::Sequence(children) => join(f, children, ","),
            RuleKind::Choice(children) => join(f, children, "|"),
            RuleKind::Optional(child) => write!(f, "{}?", self.arena.name(*child)),
            RuleKind::Repetition(child) => write!(f, "{}*", self.arena.name(*child)),
            RuleKind::Epsilon => f.write_str("<EPS>"),
            RuleKind::EndOfInput => f.write_str("<EOF>"),
            RuleKind::Reference(Some(target)) => write!(f, "&{}", self.arena.name(*target)),
            RuleKind::Reference(None) => f.write_str("&?"),
        }
    }
}
