//! Cached grammar-analysis flags.
//!
//! `RuleFlags` are seeded at construction (combinators that can never fail
//! are nullable by definition) and completed by the grammar analyzer.
//! Flags only ever gain bits; nothing clears them after analysis.

use bitflags::bitflags;

bitflags! {
    /// Per-rule analysis results.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct RuleFlags: u8 {
        /// The rule can succeed without consuming input.
        const NULLABLE = 1 << 0;
        /// The rule can re-invoke itself at the same position before
        /// consuming input.
        const LEFT_RECURSIVE = 1 << 1;
    }
}

impl RuleFlags {
    /// Returns true if the rule can match the empty string.
    #[inline]
    pub fn is_nullable(self) -> bool {
        self.contains(RuleFlags::NULLABLE)
    }

    /// Returns true if the rule was found to be left-recursive.
    #[inline]
    pub fn is_left_recursive(self) -> bool {
        self.contains(RuleFlags::LEFT_RECURSIVE)
    }
}
