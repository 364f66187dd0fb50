//! Rule application with memoization and left-recursion support.
//!
//! Each parse invocation runs in a [`Session`]: a private memo table keyed by
//! `(rule, position)` plus a stack of in-progress applications (the LR
//! stack). Non-recursive grammars degenerate to plain packrat parsing.
//!
//! # Left recursion
//!
//! When an application re-enters itself at the same position, the inner call
//! returns the outer record's seed (initially a failure) and marks the outer
//! record as the anchor of a cycle. Every record between the two is tagged
//! as involved. Once the anchor's body finishes with a match, the anchor
//! grows its seed:
//!
//! 1. Make every involved rule eligible for re-evaluation at the position.
//! 2. Re-run the anchor's body; re-entry now yields the current seed.
//! 3. Keep the result if it is strictly longer, else stop.
//!
//! Length is bounded by the input, so growth terminates. Results memoized
//! at the anchor's position during a round are discarded before the next
//! round, and the entries of the last improving round are the ones kept.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use sprout_grammar::Grammar;
use sprout_ir::{RuleArena, RuleId, RuleKind};

use crate::answer::Answer;
use crate::memo::{Head, HeadId, LrRecord, MemoEntry, MemoTable};
use crate::stack::ensure_sufficient_stack;
use crate::{EvalConfig, EvalError, ParseTree};

/// Characters of remaining input shown in trace events.
const PREVIEW_CHARS: usize = 40;

/// Runs rules of a rule graph against input buffers.
///
/// Holds no per-parse state, so one evaluator can serve any number of
/// parses, from any number of threads.
#[derive(Copy, Clone, Debug)]
pub struct Evaluator<'g> {
    arena: &'g RuleArena,
    config: EvalConfig,
}

impl<'g> Evaluator<'g> {
    /// Rules reached during evaluation must have had their forward
    /// references resolved.
    pub fn new(arena: &'g RuleArena, config: EvalConfig) -> Self {
        Evaluator { arena, config }
    }

    /// Evaluator over a registered grammar.
    pub fn for_grammar(grammar: &'g Grammar, config: EvalConfig) -> Self {
        Self::new(grammar.arena(), config)
    }

    /// Apply `rule` at the start of `buffer` in a fresh session.
    ///
    /// A successful result need not cover the whole buffer; see
    /// [`ParseTree::is_complete`].
    #[tracing::instrument(level = "debug", skip_all, fields(rule = ?rule, len = buffer.len()))]
    pub fn evaluate(&self, rule: RuleId, buffer: &str) -> Result<ParseTree, EvalError> {
        let mut session = self.session(buffer);
        let tree = session.apply(rule, 0)?;
        tracing::debug!(
            matched = tree.matched(),
            length = tree.length(),
            steps = session.steps(),
            "evaluation finished"
        );
        Ok(tree)
    }

    /// Start a parse invocation over `buffer`.
    pub fn session<'b>(&self, buffer: &'b str) -> Session<'g, 'b> {
        Session {
            arena: self.arena,
            buffer,
            config: self.config,
            memo: MemoTable::default(),
            lr_stack: Vec::new(),
            heads: FxHashMap::default(),
            next_head: 0,
            heads_at: FxHashMap::default(),
            steps: 0,
        }
    }
}

/// One parse invocation: memo table, LR stack and cycle heads.
///
/// Applications within a session share memoized results, so applying the
/// same rule at the same position twice yields equal trees.
pub struct Session<'g, 'b> {
    arena: &'g RuleArena,
    buffer: &'b str,
    config: EvalConfig,
    memo: MemoTable,
    lr_stack: Vec<LrRecord>,
    /// Heads whose anchor is still on the LR stack.
    heads: FxHashMap<HeadId, Head>,
    next_head: HeadId,
    /// Head currently growing at each position.
    heads_at: FxHashMap<usize, HeadId>,
    steps: u64,
}

impl Session<'_, '_> {
    /// Apply `rule` at byte offset `pos`.
    pub fn apply(&mut self, rule: RuleId, pos: usize) -> Result<ParseTree, EvalError> {
        if !self.arena.contains(rule) {
            return Err(EvalError::UnknownRule { rule });
        }
        let answer = self.apply_rule(rule, pos)?;
        Ok(ParseTree::from_answer(&answer))
    }

    /// Rule applications performed so far, memo hits included.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Number of `(rule, position)` pairs with a memo entry.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    fn apply_rule(&mut self, rule: RuleId, pos: usize) -> Result<Rc<Answer>, EvalError> {
        ensure_sufficient_stack(|| self.apply_rule_inner(rule, pos))
    }

    fn apply_rule_inner(&mut self, rule: RuleId, pos: usize) -> Result<Rc<Answer>, EvalError> {
        self.tick()?;

        if let Some(answer) = self.reevaluate_involved(rule, pos)? {
            return Ok(answer);
        }

        match self.memo.get(rule, pos).cloned() {
            Some(MemoEntry::Final(answer)) => return Ok(answer),
            Some(MemoEntry::InProgress(index)) => {
                self.setup_lr(index);
                return Ok(Rc::clone(&self.lr_stack[index].seed));
            }
            Some(MemoEntry::Involved { seed, head }) => {
                if self.anchor_on_stack(head) {
                    self.tag_involved(head);
                    return Ok(seed);
                }
                if self.heads_at.get(&pos) == Some(&head) {
                    return Ok(seed);
                }
                // The cycle finished without revisiting this entry.
                self.memo.remove(rule, pos);
            }
            None => {}
        }

        self.apply_fresh(rule, pos)
    }

    fn apply_fresh(&mut self, rule: RuleId, pos: usize) -> Result<Rc<Answer>, EvalError> {
        let index = self.lr_stack.len();
        self.lr_stack.push(LrRecord::new(rule, pos));
        self.memo.insert(rule, pos, MemoEntry::InProgress(index));

        let body = self.eval_traced(rule, pos);
        let head = self.lr_stack.pop().and_then(|record| record.head);
        let anchored = head.filter(|head| {
            self.heads
                .get(head)
                .is_some_and(|anchor| anchor.is_anchor(rule, pos))
        });
        let answer = match body {
            Ok(answer) => answer,
            Err(err) => {
                self.memo.remove(rule, pos);
                if let Some(head) = anchored {
                    self.heads.remove(&head);
                }
                return Err(err);
            }
        };

        match head {
            Some(head) if anchored == Some(head) => {
                self.memoize(rule, pos, MemoEntry::Final(Rc::clone(&answer)));
                let result = if answer.matched {
                    self.grow(rule, pos, head, answer)
                } else {
                    Ok(answer)
                };
                // Involved entries may still name this head; ids are never reused.
                self.heads.remove(&head);
                result
            }
            Some(head) => {
                self.memoize(
                    rule,
                    pos,
                    MemoEntry::Involved {
                        seed: Rc::clone(&answer),
                        head,
                    },
                );
                Ok(answer)
            }
            None => {
                self.memoize(rule, pos, MemoEntry::Final(Rc::clone(&answer)));
                Ok(answer)
            }
        }
    }

    /// During a growth round, re-run an involved rule's body once, without
    /// pushing a record.
    fn reevaluate_involved(
        &mut self,
        rule: RuleId,
        pos: usize,
    ) -> Result<Option<Rc<Answer>>, EvalError> {
        let Some(&head) = self.heads_at.get(&pos) else {
            return Ok(None);
        };
        let Some(anchor) = self.heads.get_mut(&head) else {
            return Ok(None);
        };
        if !anchor.eval_set.remove(&rule) {
            return Ok(None);
        }
        let answer = self.eval_traced(rule, pos)?;
        self.memoize(rule, pos, MemoEntry::Final(Rc::clone(&answer)));
        Ok(Some(answer))
    }

    /// Re-entry into the record at `index`: make it an anchor (unless it
    /// already belongs to a cycle) and tag every record above it.
    fn setup_lr(&mut self, index: usize) {
        let head = match self.lr_stack[index].head {
            Some(head) => head,
            None => {
                let record = &self.lr_stack[index];
                let head = self.next_head;
                self.next_head += 1;
                self.heads.insert(head, Head::new(record.rule, record.pos));
                self.lr_stack[index].head = Some(head);
                head
            }
        };
        self.tag_involved(head);
    }

    /// Tag records from the top of the LR stack down to the first one that
    /// already belongs to `head`.
    fn tag_involved(&mut self, head: HeadId) {
        let Some(anchor) = self.heads.get_mut(&head) else {
            return;
        };
        let involved = &mut anchor.involved;
        for record in self.lr_stack.iter_mut().rev() {
            if record.head == Some(head) {
                break;
            }
            record.head = Some(head);
            involved.insert(record.rule);
        }
    }

    fn anchor_on_stack(&self, head: HeadId) -> bool {
        let Some(anchor) = self.heads.get(&head) else {
            return false;
        };
        self.lr_stack
            .iter()
            .any(|record| record.head == Some(head) && anchor.is_anchor(record.rule, record.pos))
    }

    fn grow(
        &mut self,
        rule: RuleId,
        pos: usize,
        head: HeadId,
        seed: Rc<Answer>,
    ) -> Result<Rc<Answer>, EvalError> {
        let outer = self.heads_at.insert(pos, head);
        let mut best = seed;
        let mut committed: Vec<(RuleId, MemoEntry)> = Vec::new();
        let mut rounds = 0u32;

        let outcome = loop {
            let stale = self
                .heads
                .get_mut(&head)
                .map(Head::begin_round)
                .unwrap_or_default();
            self.discard(rule, pos, stale);

            let answer = match self.eval_traced(rule, pos) {
                Ok(answer) => answer,
                Err(err) => break Err(err),
            };
            if !answer.improves_on(&best) {
                break Ok(());
            }
            rounds += 1;
            best = answer;
            self.memo
                .insert(rule, pos, MemoEntry::Final(Rc::clone(&best)));
            committed = self
                .heads
                .get(&head)
                .map(|anchor| anchor.written.as_slice())
                .unwrap_or_default()
                .iter()
                .filter_map(|&r| self.memo.get(r, pos).map(|entry| (r, entry.clone())))
                .collect();
        };

        let stale = self
            .heads
            .get_mut(&head)
            .map(|anchor| std::mem::take(&mut anchor.written))
            .unwrap_or_default();
        self.discard(rule, pos, stale);
        match outer {
            Some(outer) => self.heads_at.insert(pos, outer),
            None => self.heads_at.remove(&pos),
        };
        outcome?;

        for (r, entry) in committed {
            self.memoize(r, pos, entry);
        }
        self.memoize(rule, pos, MemoEntry::Final(Rc::clone(&best)));
        tracing::trace!(
            rule = self.arena.name(rule),
            pos,
            rounds,
            length = best.length,
            "seed grown"
        );
        Ok(best)
    }

    /// Drop memo entries at `pos` written during a growth round, sparing
    /// the anchor's.
    fn discard(&mut self, anchor: RuleId, pos: usize, written: Vec<RuleId>) {
        for r in written {
            if r != anchor {
                self.memo.remove(r, pos);
            }
        }
    }

    /// Store `entry`, noting it on the head growing at `pos`, if any.
    fn memoize(&mut self, rule: RuleId, pos: usize, entry: MemoEntry) {
        self.memo.insert(rule, pos, entry);
        let growing = self.heads_at.get(&pos);
        if let Some(anchor) = growing.and_then(|head| self.heads.get_mut(head)) {
            anchor.written.push(rule);
        }
    }

    fn tick(&mut self) -> Result<(), EvalError> {
        self.steps += 1;
        match self.config.step_limit {
            Some(limit) if self.steps > limit => Err(EvalError::StepLimitExceeded { limit }),
            _ => Ok(()),
        }
    }

    fn eval_traced(&mut self, rule: RuleId, pos: usize) -> Result<Rc<Answer>, EvalError> {
        if !self.config.trace {
            return self.eval_body(rule, pos);
        }

        let arena = self.arena;
        let span = tracing::trace_span!(
            target: "sprout_eval::trace",
            "apply",
            rule = %arena.display(rule),
            pos
        );
        let _enter = span.enter();
        tracing::trace!(
            target: "sprout_eval::trace",
            input = preview(self.buffer, pos),
            "enter"
        );
        let result = self.eval_body(rule, pos);
        match &result {
            Ok(answer) => tracing::trace!(
                target: "sprout_eval::trace",
                matched = answer.matched,
                length = answer.length,
                "exit"
            ),
            Err(err) => tracing::trace!(target: "sprout_eval::trace", %err, "exit"),
        }
        result
    }

    fn eval_body(&mut self, rule: RuleId, pos: usize) -> Result<Rc<Answer>, EvalError> {
        let arena = self.arena;
        let answer = match arena.kind(rule) {
            RuleKind::Literal(text) => {
                let rest = self.buffer.get(pos..);
                if rest.is_some_and(|rest| rest.starts_with(text.as_str())) {
                    Answer::leaf(rule, pos, text.len())
                } else {
                    Answer::fail(rule, pos)
                }
            }
            RuleKind::Pattern(pattern) => {
                match self.buffer.get(pos..).and_then(|rest| pattern.match_len(rest)) {
                    Some(0) => {
                        return Err(EvalError::EmptyPatternMatch {
                            rule,
                            pattern: pattern.source().to_owned(),
                            pos,
                        })
                    }
                    Some(length) => Answer::leaf(rule, pos, length),
                    None => Answer::fail(rule, pos),
                }
            }
            RuleKind::Sequence(children) => {
                if children.is_empty() {
                    return Ok(Answer::fail(rule, pos));
                }
                let mut end = pos;
                let mut matched = Vec::with_capacity(children.len());
                for &child in children {
                    let answer = self.apply_rule(child, end)?;
                    if !answer.matched {
                        return Ok(Answer::fail(rule, pos));
                    }
                    end = answer.end();
                    matched.push(answer);
                }
                Answer::node(rule, pos, end - pos, matched)
            }
            RuleKind::Choice(children) => {
                let mut chosen = None;
                for &child in children {
                    let answer = self.apply_rule(child, pos)?;
                    if answer.matched {
                        chosen = Some(answer);
                        break;
                    }
                }
                match chosen {
                    Some(answer) => Answer::node(rule, pos, answer.length, vec![answer]),
                    None => Answer::fail(rule, pos),
                }
            }
            RuleKind::Optional(child) => {
                let answer = self.apply_rule(*child, pos)?;
                if answer.matched {
                    Answer::node(rule, pos, answer.length, vec![answer])
                } else {
                    Answer::leaf(rule, pos, 0)
                }
            }
            RuleKind::Repetition(child) => {
                let mut end = pos;
                let mut items = Vec::new();
                loop {
                    let answer = self.apply_rule(*child, end)?;
                    // A zero-length item would repeat forever.
                    if !answer.matched || answer.length == 0 {
                        break;
                    }
                    end = answer.end();
                    items.push(answer);
                }
                Answer::node(rule, pos, end - pos, items)
            }
            RuleKind::Epsilon => Answer::leaf(rule, pos, 0),
            RuleKind::EndOfInput => {
                if pos == self.buffer.len() {
                    Answer::leaf(rule, pos, 0)
                } else {
                    Answer::fail(rule, pos)
                }
            }
            RuleKind::Reference(_) => return Err(EvalError::UnresolvedReference { rule }),
        };
        Ok(answer)
    }
}

/// Up to [`PREVIEW_CHARS`] characters of input from `pos`.
fn preview(buffer: &str, pos: usize) -> &str {
    let rest = buffer.get(pos..).unwrap_or_default();
    match rest.char_indices().nth(PREVIEW_CHARS) {
        Some((end, _)) => &rest[..end],
        None => rest,
    }
}
