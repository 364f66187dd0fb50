//! Internal match results.
//!
//! Answers are immutable once built and shared through `Rc` between the memo
//! table, LR records and parent answers, so memo hits and seed updates never
//! copy subtrees. They are turned into an owned [`ParseTree`](crate::ParseTree)
//! only at the API boundary.

use std::rc::Rc;

use sprout_ir::RuleId;

/// Result of one rule application.
///
/// Invariant: a failed answer has zero length and no children.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Answer {
    pub rule: RuleId,
    pub start: usize,
    pub matched: bool,
    pub length: usize,
    pub children: Vec<Rc<Answer>>,
}

impl Answer {
    pub fn fail(rule: RuleId, start: usize) -> Rc<Self> {
        Rc::new(Answer {
            rule,
            start,
            matched: false,
            length: 0,
            children: Vec::new(),
        })
    }

    pub fn leaf(rule: RuleId, start: usize, length: usize) -> Rc<Self> {
        Self::node(rule, start, length, Vec::new())
    }

    pub fn node(rule: RuleId, start: usize, length: usize, children: Vec<Rc<Answer>>) -> Rc<Self> {
        Rc::new(Answer {
            rule,
            start,
            matched: true,
            length,
            children,
        })
    }

    /// Offset just past the matched text.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Whether `self` is a strictly longer match than `other`.
    #[inline]
    pub fn improves_on(&self, other: &Answer) -> bool {
        self.matched && (!other.matched || self.length > other.length)
    }
}
