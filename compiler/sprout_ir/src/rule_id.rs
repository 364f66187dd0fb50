//! Rule handles.
//!
//! A `RuleId` is the identity of a node in the rule graph. Two rules with the
//! same name are still distinct rules; equality is handle equality.

use std::fmt;

/// Index into a [`RuleArena`](crate::RuleArena).
///
/// - Memory: 4 bytes
/// - Equality: O(1) integer compare
/// - Usable as a memo-table key together with a buffer position
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        RuleId(index)
    }

    /// Position in the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_id_index() {
        let id = RuleId::new(7);
        assert_eq!(id.index(), 7);
        assert_eq!(format!("{id:?}"), "RuleId(7)");
    }

    #[test]
    fn test_rule_id_hash() {
        use rustc_hash::FxHashSet;
        let mut set = FxHashSet::default();
        set.insert(RuleId::new(1));
        set.insert(RuleId::new(1));
        set.insert(RuleId::new(2));
        assert_eq!(set.len(), 2);
    }
}
