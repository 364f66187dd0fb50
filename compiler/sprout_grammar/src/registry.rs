//! The grammar registry.
//!
//! Lifecycle: created around a rule arena, populated by [`Grammar::register`]
//! (any number of times), finalized by [`Grammar::analyze`]. A finalized
//! grammar is read-only and can be shared by concurrent parses.

use rustc_hash::{FxHashMap, FxHashSet};
use sprout_ir::{GrammarBuilder, Rule, RuleArena, RuleFlags, RuleId};

use crate::{nullable_fixpoint, GrammarError, LeftRecursion};

/// A set of rules reachable from one or more roots, plus their analysis.
#[derive(Clone, Debug, Default)]
pub struct Grammar {
    arena: RuleArena,
    roots: Vec<RuleId>,
    /// Registered rules in discovery order, each once.
    rules: Vec<RuleId>,
    registered: FxHashSet<RuleId>,
    /// First rule registered under each name.
    by_name: FxHashMap<String, RuleId>,
    /// Present once the grammar is finalized.
    analysis: Option<LeftRecursion>,
}

impl Grammar {
    /// Create an empty grammar over `arena`.
    pub fn new(arena: RuleArena) -> Self {
        Grammar {
            arena,
            ..Self::default()
        }
    }

    /// Resolve forward references reachable from `roots` and record every
    /// reachable rule.
    ///
    /// Returns the roots after resolution (a root may itself have been a
    /// forward reference). Rules already registered are skipped.
    #[tracing::instrument(level = "debug", skip_all, fields(roots = roots.len()))]
    pub fn register(&mut self, roots: &[RuleId]) -> Result<Vec<RuleId>, GrammarError> {
        if self.is_finalized() {
            return Err(GrammarError::Finalized);
        }
        if let Some(&rule) = roots.iter().find(|&&id| !self.arena.contains(id)) {
            return Err(GrammarError::UnknownRule { rule });
        }

        let roots = self.arena.resolve_references(roots)?;
        let before = self.rules.len();
        for id in self.arena.reachable(&roots) {
            if !self.registered.insert(id) {
                continue;
            }
            self.rules.push(id);
            self.by_name
                .entry(self.arena.name(id).to_owned())
                .or_insert(id);
        }
        for &root in &roots {
            if !self.roots.contains(&root) {
                self.roots.push(root);
            }
        }

        tracing::debug!(
            added = self.rules.len() - before,
            total = self.rules.len(),
            "rules registered"
        );
        Ok(roots)
    }

    /// Run nullability and left-recursion analysis and finalize the grammar.
    ///
    /// Calling it again on a finalized grammar does nothing.
    #[tracing::instrument(level = "debug", skip_all, fields(rules = self.rules.len()))]
    pub fn analyze(&mut self) {
        if self.is_finalized() {
            return;
        }

        let nullable = nullable_fixpoint(&self.arena, &self.rules);
        for &id in &nullable {
            self.arena.get_mut(id).insert_flags(RuleFlags::NULLABLE);
        }

        let closure = LeftRecursion::compute(&self.arena, &self.rules, &nullable);
        for &id in &self.rules {
            if closure.is_left_recursive(id) {
                self.arena.get_mut(id).insert_flags(RuleFlags::LEFT_RECURSIVE);
            }
        }
        self.analysis = Some(closure);

        let left_recursive: Vec<&str> = self
            .left_recursive_rules()
            .map(|id| self.arena.name(id))
            .collect();
        tracing::debug!(
            nullable = nullable.len(),
            ?left_recursive,
            "grammar analyzed"
        );
    }

    /// Whether [`analyze`](Self::analyze) has run.
    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.analysis.is_some()
    }

    /// The underlying rule graph.
    #[inline]
    pub fn arena(&self) -> &RuleArena {
        &self.arena
    }

    #[inline]
    pub fn rule(&self, id: RuleId) -> &Rule {
        self.arena.get(id)
    }

    /// Registered roots, after resolution.
    pub fn roots(&self) -> &[RuleId] {
        &self.roots
    }

    /// Registered rules, in discovery order.
    pub fn rules(&self) -> &[RuleId] {
        &self.rules
    }

    /// Number of distinct registered rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: RuleId) -> bool {
        self.registered.contains(&id)
    }

    /// First registered rule with the given name.
    pub fn get(&self, name: &str) -> Option<RuleId> {
        self.by_name.get(name).copied()
    }

    /// Distinct rule names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Whether `a` may apply `b` first, at its own position.
    ///
    /// Always false before analysis.
    pub fn could_start_with(&self, a: RuleId, b: RuleId) -> bool {
        self.analysis
            .as_ref()
            .is_some_and(|closure| closure.could_start_with(a, b))
    }

    /// Registered rules flagged left-recursive.
    pub fn left_recursive_rules(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.rules
            .iter()
            .copied()
            .filter(|&id| self.arena.flags(id).is_left_recursive())
    }

    /// Registered rules flagged nullable.
    pub fn nullable_rules(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.rules
            .iter()
            .copied()
            .filter(|&id| self.arena.flags(id).is_nullable())
    }
}

impl From<GrammarBuilder> for Grammar {
    fn from(builder: GrammarBuilder) -> Self {
        Grammar::new(builder.finish())
    }
}
