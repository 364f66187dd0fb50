//! Per-invocation bookkeeping: memo table, LR stack records and heads.
//!
//! Memo entries move through
//! `absent -> InProgress -> (Involved ->)* Final`; only `Final` answers leave
//! the evaluator. `InProgress` points at the application's record on the LR
//! stack, so a re-entrant call can tag every record above it.

use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use sprout_ir::RuleId;

use crate::answer::Answer;

/// Key of a head in the session's head map. Never reused within a session.
pub(crate) type HeadId = usize;

#[derive(Clone, Debug)]
pub(crate) enum MemoEntry {
    /// The application is running; payload is its LR stack index.
    InProgress(usize),
    /// The application finished as a participant of a left-recursive cycle
    /// anchored elsewhere. Its result is only valid while that cycle grows.
    Involved { seed: Rc<Answer>, head: HeadId },
    Final(Rc<Answer>),
}

/// An application in progress.
#[derive(Debug)]
pub(crate) struct LrRecord {
    pub rule: RuleId,
    pub pos: usize,
    /// Answer returned to re-entrant calls. Always a failure: the record is
    /// only consulted before its body finishes.
    pub seed: Rc<Answer>,
    /// Set once a re-entrant call discovers the record is part of a cycle.
    pub head: Option<HeadId>,
}

impl LrRecord {
    pub fn new(rule: RuleId, pos: usize) -> Self {
        LrRecord {
            rule,
            pos,
            seed: Answer::fail(rule, pos),
            head: None,
        }
    }
}

/// A left-recursive cycle, identified by its anchor application.
#[derive(Debug)]
pub(crate) struct Head {
    pub rule: RuleId,
    pub pos: usize,
    /// Rules met between the anchor and the re-entrant call.
    pub involved: FxHashSet<RuleId>,
    /// Involved rules not yet re-evaluated in the current growth round.
    pub eval_set: FxHashSet<RuleId>,
    /// Rules memoized at `pos` during the current growth round.
    pub written: Vec<RuleId>,
}

impl Head {
    pub fn new(rule: RuleId, pos: usize) -> Self {
        Head {
            rule,
            pos,
            involved: FxHashSet::default(),
            eval_set: FxHashSet::default(),
            written: Vec::new(),
        }
    }

    #[inline]
    pub fn is_anchor(&self, rule: RuleId, pos: usize) -> bool {
        self.rule == rule && self.pos == pos
    }

    /// Start a growth round: every involved rule becomes eligible again.
    pub fn begin_round(&mut self) -> Vec<RuleId> {
        self.eval_set.clone_from(&self.involved);
        std::mem::take(&mut self.written)
    }
}

/// Memo table keyed by `(rule, position)`.
#[derive(Debug, Default)]
pub(crate) struct MemoTable {
    entries: FxHashMap<(RuleId, usize), MemoEntry>,
}

impl MemoTable {
    #[inline]
    pub fn get(&self, rule: RuleId, pos: usize) -> Option<&MemoEntry> {
        self.entries.get(&(rule, pos))
    }

    #[inline]
    pub fn insert(&mut self, rule: RuleId, pos: usize, entry: MemoEntry) {
        self.entries.insert((rule, pos), entry);
    }

    #[inline]
    pub fn remove(&mut self, rule: RuleId, pos: usize) -> Option<MemoEntry> {
        self.entries.remove(&(rule, pos))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
